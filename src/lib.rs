//! Iguana - movelist generation for Ikemen characters
//!
//! Converts a character's command definition file into a movelist listing
//! its special and hyper moves with their inputs.

pub mod batch;
pub mod core;
pub mod ini;
pub mod movelist;
pub mod patch;

pub use movelist::convert;
