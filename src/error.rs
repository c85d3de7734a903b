//! Unified error types for the audit log facade.
//!
//! This module provides a clean error type that wraps log store errors and
//! configuration failures behind one interface.

use thiserror::Error;

/// All audit log errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The resource has no history
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store failed
    #[error("storage error: {0}")]
    Storage(String),

    /// The operation's context was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// The operation's context deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Configuration could not be parsed or is inconsistent
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for audit log operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if the operation was aborted by its context.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }

    /// Check if the backing store failed.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

// Convert from log store errors
impl From<auditlog_core::Error> for Error {
    fn from(e: auditlog_core::Error) -> Self {
        use auditlog_core::Error as CoreError;
        match e {
            CoreError::NotFound { key } => Error::NotFound(key.to_string()),
            CoreError::Storage(msg) => Error::Storage(msg),
            CoreError::Cancelled => Error::Cancelled,
            CoreError::DeadlineExceeded => Error::DeadlineExceeded,
        }
    }
}

// Convert from TOML parse errors
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
