//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Message shown when the server gives no reason for a failure.
pub const FALLBACK_MESSAGE: &str = "Analysis failed";

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File extension is not PDF, DOCX or TXT
    #[error("Unsupported file type: {0}. Please upload PDF, DOCX, or TXT")]
    UnsupportedFile(String),

    /// File exceeds the upload limit
    #[error("File too large: {path} is {size} bytes (max: {limit})")]
    FileTooLarge {
        /// File that was rejected
        path: String,
        /// Its size in bytes
        size: u64,
        /// The configured limit in bytes
        limit: u64,
    },

    /// Could not reach the server
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server answered with an error
    #[error("{message} (HTTP {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the `{error, message}` body
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            CliError::Server {
                status: status.as_u16(),
                message: FALLBACK_MESSAGE.to_string(),
            }
        } else {
            CliError::Connection(e.to_string())
        }
    }
}
