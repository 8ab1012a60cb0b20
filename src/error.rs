use thiserror::Error;

/// Errors surfaced by the classification core and its input sources.
///
/// Only dictionary construction and input loading can fail; tokenizing,
/// matching and aggregating are total once a validated dictionary exists.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: duplicate dictionary key '{key}'")]
    DuplicateKey { key: String },

    #[error("Configuration error: dictionary entry #{position} has an empty key")]
    EmptyKey { position: usize },

    #[error("Configuration error: dictionary entry '{key}' has level 'unknown' (expected low, medium or high)")]
    UnknownLevel { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CheckError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
