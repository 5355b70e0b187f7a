//! Movelist generation pipeline
//!
//! source text -> sections -> (commands, moves) -> move table -> movelist text

pub mod assemble;
pub mod classify;
pub mod extract;
pub mod format;
pub mod merge;
pub mod token;

pub use assemble::{assemble_move_table, MoveEntry};
pub use classify::is_ai_only;
pub use extract::{extract, Command, Move};
pub use format::format_move_table;
pub use merge::merge;
pub use token::{detokenize, tokenize};

use crate::core::config::ConvertOptions;
use crate::ini::{parse_document, IniDocument};

/// Convert the text of a command file into movelist text
///
/// Never fails: anything that can't be interpreted simply yields fewer
/// entries.
pub fn convert(source: &str, options: &ConvertOptions) -> String {
    let doc = parse_document(source);
    convert_document(&doc, options)
}

/// Convert an already parsed command file
pub fn convert_document(doc: &IniDocument, options: &ConvertOptions) -> String {
    let (commands, moves) = extract(doc, options.default_command_time);
    let table = assemble_move_table(&commands, &moves, options);
    tracing::info!(
        "{} commands, {} moves, {} movelist entries",
        commands.len(),
        moves.len(),
        table.len()
    );
    format_move_table(&table, options)
}
