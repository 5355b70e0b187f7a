//! Join moves to their commands
//!
//! Each move's triggers name one or more commands. The matched commands are
//! tokenized, held singletons are split off into a bracketed prefix, and the
//! rest are merged into one notation. A `power` trigger turns the move into a hyper.

use super::classify::is_ai_only;
use super::extract::{Command, Move};
use super::merge::merge;
use super::token::{is_held_token, tokenize};
use crate::core::config::ConvertOptions;

const COMMAND_KEY: &str = "command";
const COMMAND_PREFIX: &str = "command=\"";
const POWER_KEY: &str = "power";

/// One line of the movelist before rendering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveEntry {
    pub name: String,
    /// Merged tokenized notation
    pub command: String,
    /// Held-input tokens as `[t1 t2]`, rendered in front of `command`
    pub held: String,
    /// Power gate; 0 for special moves
    pub power: i32,
}

impl MoveEntry {
    pub fn is_hyper(&self) -> bool {
        self.power != 0
    }
}

/// The command name a trigger refers to
///
/// `command="QCF_x"` yields `QCF_x`. A trigger without the word `command` is
/// returned whole, which is how power triggers reach [`power_threshold`].
pub fn command_reference(trigger: &str) -> &str {
    let lower = trigger.to_ascii_lowercase();
    if !lower.contains(COMMAND_KEY) {
        return trigger;
    }

    let Some(start) = lower.find(COMMAND_PREFIX).map(|i| i + COMMAND_PREFIX.len()) else {
        return trigger;
    };

    let name = &trigger[start..];
    match name.find('"') {
        Some(end) => &name[..end],
        None => name,
    }
}

/// Power value from `power>=N` / `power>N` / `power=N`
///
/// The value must fit in 16 bits; anything else gives 0.
pub fn power_threshold(trigger: &str) -> i32 {
    let offset = if trigger.contains(">=") { 7 } else { 6 };
    trigger
        .get(offset..)
        .and_then(|value| value.parse::<i16>().ok())
        .map(i32::from)
        .unwrap_or(0)
}

fn is_held_singleton(tokens: &str) -> bool {
    let mut chars = tokens.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_held_token(c))
}

fn assemble_entry(mv: &Move, commands: &[Command], options: &ConvertOptions) -> Option<MoveEntry> {
    tracing::debug!("Reading move: {}", mv.name);

    let mut collected: Vec<String> = Vec::new();
    let mut power = 0;

    for trigger in &mv.triggers {
        let reference = command_reference(trigger);

        for command in commands.iter().filter(|c| c.name == reference) {
            if !options.keep_ai && is_ai_only(command) {
                tracing::debug!("Command detected as AI-only: {}", command.name);
                continue;
            }

            let tokens = tokenize(&command.command, options.compress_motions);
            tracing::debug!("Tokenized {:?} as {:?}", command.command, tokens);
            collected.push(tokens);
        }

        if reference.to_ascii_lowercase().contains(POWER_KEY) {
            power = power_threshold(reference);
            tracing::debug!("Power requirement detected: {} ({})", reference, power);
        }
    }

    let (held, alternates): (Vec<String>, Vec<String>) =
        collected.into_iter().partition(|t| is_held_singleton(t));

    let command = merge(&alternates);
    let held = if held.is_empty() {
        String::new()
    } else {
        format!("[{}]", held.join(" "))
    };

    if command.is_empty() && held.is_empty() {
        tracing::debug!("Move {} has no usable commands, discarding", mv.name);
        return None;
    }

    Some(MoveEntry {
        name: mv.name.clone(),
        command,
        held,
        power,
    })
}

/// Build the move table, one entry per move with a representable input
pub fn assemble_move_table(
    commands: &[Command],
    moves: &[Move],
    options: &ConvertOptions,
) -> Vec<MoveEntry> {
    let table: Vec<MoveEntry> = moves
        .iter()
        .filter_map(|mv| assemble_entry(mv, commands, options))
        .collect();

    tracing::debug!("Assembled {} of {} moves", table.len(), moves.len());
    table
}
