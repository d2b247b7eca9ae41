//! Live execution error types.

use thiserror::Error;

/// Errors that can occur while preparing or running a script.
#[derive(Debug, Error)]
pub enum LiveError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The interpreter could not be started.
    #[error("Failed to start interpreter '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested line does not exist in the document.
    #[error("Line {line} is out of range (document has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    /// Selection mode was invoked without any code.
    #[error("No code selected to execute.")]
    EmptySelection,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LiveError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
