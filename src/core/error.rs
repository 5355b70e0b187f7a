use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IguanaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid option file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Input file is not a command (.cmd) file: {0:?}")]
    NotACommandFile(PathBuf),

    #[error("No definition file references {0:?}")]
    NoDefinitionFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, IguanaError>;
