//! Pull command and move records out of parsed sections
//!
//! Everything before `[Statedef -1]` may hold `[Command]` blocks; everything
//! after it is a candidate move. The sentinel itself is neither.

use crate::ini::{IniDocument, Section};

/// Section that ends the command list and starts the move list
pub const SENTINEL: &str = "Statedef -1";

/// Data from a `[Command]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name that triggers refer to
    pub name: String,
    /// Input notation with whitespace removed
    pub command: String,
    /// Frames allowed to complete the input
    pub time: i32,
}

/// Data from a state controller after the sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Move {
    pub name: String,
    /// Whitespace-stripped trigger values that mention a command or power
    pub triggers: Vec<String>,
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sections before the sentinel, or all of them if there is none
fn command_region(doc: &IniDocument) -> &[Section] {
    let sections = doc.sections();
    let end = sections
        .iter()
        .position(|s| s.name_is(SENTINEL))
        .unwrap_or(sections.len());
    &sections[..end]
}

/// Sections after the sentinel; empty if there is none
fn move_region(doc: &IniDocument) -> &[Section] {
    let sections = doc.sections();
    match sections.iter().position(|s| s.name_is(SENTINEL)) {
        Some(i) => &sections[i + 1..],
        None => &[],
    }
}

/// Command window from `[Defaults] command.time`, falling back to `fallback`
pub fn default_command_time(doc: &IniDocument, fallback: i32) -> i32 {
    command_region(doc)
        .iter()
        .filter(|s| s.name_is("Defaults"))
        .find_map(|s| s.get("command.time"))
        .and_then(|time| time.trim().parse().ok())
        .unwrap_or(fallback)
}

/// Every `[Command]` section before the sentinel
pub fn scrape_commands(doc: &IniDocument, default_time: i32) -> Vec<Command> {
    let commands: Vec<Command> = command_region(doc)
        .iter()
        .filter(|s| s.name_is("Command"))
        .map(|section| {
            let command = Command {
                name: section.get("name").unwrap_or_default().trim().to_string(),
                command: strip_whitespace(section.get("command").unwrap_or_default()),
                time: section
                    .get("time")
                    .and_then(|time| time.trim().parse().ok())
                    .unwrap_or(default_time),
            };
            tracing::debug!("Found command: {:?}", command);
            command
        })
        .collect();

    tracing::debug!("Scraped {} commands", commands.len());
    commands
}

/// Label after the first comma of a state header, or the whole header
fn move_name(header: &str) -> &str {
    match header.split_once(',') {
        Some((_, label)) => label.trim(),
        None => header.trim(),
    }
}

/// Read one state controller; `None` unless it is a ChangeState that
/// checks a command
fn scrape_move(section: &Section) -> Option<Move> {
    let mut mv = Move {
        name: move_name(section.name()).to_string(),
        triggers: Vec::new(),
    };
    let mut has_command = false;

    for key in section.keys() {
        for value in key.shadows() {
            if key.name_is("type") && !value.trim().eq_ignore_ascii_case("ChangeState") {
                tracing::debug!("Move {} is not a ChangeState, discarding", mv.name);
                return None;
            }

            let compact = strip_whitespace(value);
            let lower = compact.to_ascii_lowercase();
            let mut checks_command = lower.contains("command");

            if checks_command {
                has_command = true;
                // command != "x" never names the input for this move
                if lower.contains("!=") {
                    tracing::debug!("Trigger {} is a not-equals check, skipping", value);
                    checks_command = false;
                }
            }

            if checks_command || lower.contains("power") {
                mv.triggers.push(compact);
            }
        }
    }

    if !has_command {
        return None;
    }

    tracing::debug!("Found move: {:?}", mv);
    Some(mv)
}

/// Every qualifying state controller after the sentinel
pub fn scrape_moves(doc: &IniDocument) -> Vec<Move> {
    let moves: Vec<Move> = move_region(doc).iter().filter_map(scrape_move).collect();
    tracing::debug!("Scraped {} moves", moves.len());
    moves
}

/// Commands and moves of a document
pub fn extract(doc: &IniDocument, fallback_time: i32) -> (Vec<Command>, Vec<Move>) {
    let default_time = default_command_time(doc, fallback_time);
    (scrape_commands(doc, default_time), scrape_moves(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse_document;

    const SOURCE: &str = r#"
[Defaults]
command.time = 20

[Command]
name = "QCF_x"
command = ~D, DF, F, x
time = 10

[Command]
name = "x"
command = x

[Command]
name = "broken"
time = soon

[Statedef -1]

[State -1, Fireball]
type = ChangeState
value = 1000
triggerall = command = "QCF_x"
trigger1 = statetype != A
trigger1 = ctrl

[State -1, Super]
type = ChangeState
value = 3000
triggerall = command = "QCF_x"
triggerall = power >= 1000
trigger1 = ctrl

[State -1, AI Helper]
type = VarSet
trigger1 = command = "x"

[State -1, Not A Move]
type = ChangeState
trigger1 = ctrl

[State -1, Excluded]
type = ChangeState
trigger1 = command != "holdfwd"

[Command]
name = "late"
command = y
"#;

    #[test]
    fn test_commands_stop_at_sentinel() {
        let doc = parse_document(SOURCE);
        let commands = scrape_commands(&doc, 15);
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["QCF_x", "x", "broken"]);
        assert_eq!(commands[0].command, "~D,DF,F,x");
    }

    #[test]
    fn test_command_time_defaults() {
        let doc = parse_document(SOURCE);
        let (commands, _) = extract(&doc, 15);
        assert_eq!(commands[0].time, 10);
        // from [Defaults]
        assert_eq!(commands[1].time, 20);
        // unparseable falls back too
        assert_eq!(commands[2].time, 20);
        assert_eq!(commands[2].command, "");
    }

    #[test]
    fn test_fallback_time_without_defaults() {
        let doc = parse_document("[Command]\nname = \"a\"\ncommand = a\n[Statedef -1]\n");
        let (commands, _) = extract(&doc, 15);
        assert_eq!(commands[0].time, 15);
    }

    #[test]
    fn test_moves_after_sentinel() {
        let doc = parse_document(SOURCE);
        let moves = scrape_moves(&doc);
        let names: Vec<&str> = moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Fireball", "Super", "Excluded"]);
    }

    #[test]
    fn test_move_triggers() {
        let doc = parse_document(SOURCE);
        let moves = scrape_moves(&doc);
        assert_eq!(moves[0].triggers, vec![r#"command="QCF_x""#.to_string()]);
        assert_eq!(
            moves[1].triggers,
            vec![r#"command="QCF_x""#.to_string(), "power>=1000".to_string()]
        );
    }

    #[test]
    fn test_not_equals_counts_but_is_not_collected() {
        let doc = parse_document(SOURCE);
        let moves = scrape_moves(&doc);
        assert_eq!(moves[2].name, "Excluded");
        assert!(moves[2].triggers.is_empty());
    }

    #[test]
    fn test_no_sentinel_means_no_moves() {
        let doc = parse_document("[Command]\nname = \"a\"\ncommand = a\n[State -1, A]\ntype = ChangeState\ntrigger1 = command = \"a\"\n");
        let (commands, moves) = extract(&doc, 15);
        assert_eq!(commands.len(), 1);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_move_name_without_comma() {
        assert_eq!(move_name("State -1"), "State -1");
        assert_eq!(move_name("State -1,  Kick , extra"), "Kick , extra");
    }
}
