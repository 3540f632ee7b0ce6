// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Media file could not be probed
    ProbeFail(String),
    /// External encoder or filter failure
    ProcessingError(String),
    /// File system operation failed
    FsFail(String),
    /// Material collaborator returned nothing usable
    DownloadFailed(String),
    /// Confirmation attempted with every clip unchecked
    NoSelection,
    /// Event not valid in the current workflow state
    InvalidState(String),
    /// No stored session for the task
    SessionNotFound(String),
    /// Configuration could not be loaded or is inconsistent
    ConfigError(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::DownloadFailed(msg) => write!(f, "Failed to download videos: {}", msg),
            DomainError::NoSelection => write!(f, "Please select at least one video"),
            DomainError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            DomainError::SessionNotFound(task) => write!(f, "No session for task: {}", task),
            DomainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
