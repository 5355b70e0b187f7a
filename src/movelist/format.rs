//! Render the move table in movelist.dat layout

use super::assemble::MoveEntry;
use super::token::detokenize;
use crate::core::config::{validated_color, ConvertOptions};

const SPECIAL_HEADER: &str = "Special Moves";
const HYPER_HEADER: &str = "Hyper Moves";
const COLUMN_GAP: &str = "\t\t\t";

fn header(title: &str, color: &str) -> String {
    format!("<#{}>:{}:</>\n", color, title)
}

/// Single-token specials are usually plain normals
fn is_trivial(entry: &MoveEntry) -> bool {
    !entry.is_hyper() && entry.command.chars().count() == 1
}

/// Render entries as a "Special Moves" block and, if any hypers survive, a
/// "Hyper Moves" block after a blank line
pub fn format_move_table(entries: &[MoveEntry], options: &ConvertOptions) -> String {
    let header_color = validated_color(&options.header_color);
    let power_color = validated_color(&options.power_color);

    let mut specials = header(SPECIAL_HEADER, header_color);
    let mut hypers = String::new();

    for entry in entries {
        if !options.keep_single_button && is_trivial(entry) {
            tracing::debug!("Dropping single-button move: {}", entry.name);
            continue;
        }

        let notation = format!(
            "{}{}",
            detokenize(&entry.held, options.buttons),
            detokenize(&entry.command, options.buttons)
        );

        if entry.is_hyper() {
            hypers.push_str(&format!(
                "{} <#{}>({})</>{}{}\n",
                entry.name, power_color, entry.power, COLUMN_GAP, notation
            ));
        } else {
            specials.push_str(&format!("{}{}{}\n", entry.name, COLUMN_GAP, notation));
        }
    }

    if hypers.is_empty() {
        return specials;
    }

    format!("{}\n{}{}", specials, header(HYPER_HEADER, header_color), hypers)
}
