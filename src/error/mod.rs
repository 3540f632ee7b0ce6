//! Error handling module for ReelPick

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ReelPick library operations
#[derive(Error, Debug)]
pub enum ReelPickError {
    /// Domain rule or port failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Tracing subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    LoggingInit { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),
}

/// Result type alias for ReelPick operations
pub type ReelPickResult<T> = std::result::Result<T, ReelPickError>;
