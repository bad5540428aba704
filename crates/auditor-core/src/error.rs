//! Error types for the auditor client.

use crate::config::ConfigError;
use thiserror::Error;

/// Core error type for auditor operations.
#[derive(Error, Debug)]
pub enum AuditorError {
    /// A required upload was not selected. The view has already been alerted.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The request could not be sent or the connection failed.
    #[error("Request error: {0}")]
    Request(String),

    /// The response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O errors (reading upload files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for auditor operations.
pub type Result<T> = std::result::Result<T, AuditorError>;
