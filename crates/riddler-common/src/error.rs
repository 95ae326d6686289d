//! Common error types for Riddler components.

use thiserror::Error;

/// Common errors across Riddler components
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// Count out of range, or a difficulty/category outside its enumeration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error (serialization and similar)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PuzzleError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// The message without the variant prefix, as shown to end users
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(msg) | Self::Internal(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
