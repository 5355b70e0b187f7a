pub mod config;
pub mod error;

pub use config::{ButtonScheme, ConvertOptions};
pub use error::{IguanaError, Result};
