//! Section/key-value model for command and definition files

pub mod document;
pub mod parser;

pub use document::{IniDocument, Key, Section};
pub use parser::{header_name, is_entry, parse_document};
