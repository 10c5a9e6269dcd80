//! Error types for the utility generator
//!
//! The generator itself never fails: malformed shorthands degrade to defaults
//! and theme misses simply produce fewer utilities. Errors only surface from
//! option validation, configuration loading and the command-line front end.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilitiesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },
}

pub type Result<T> = std::result::Result<T, UtilitiesError>;

impl UtilitiesError {
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
