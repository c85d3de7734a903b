//! Error taxonomy for log stores
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | `NotFound` | `first_log_entry` / `last_log_entry` on an absent or empty log |
//! | `Storage` | any operation, when the underlying medium fails |
//! | `Cancelled` | any operation, when its context was cancelled |
//! | `DeadlineExceeded` | any operation, when its context deadline passed |
//!
//! Errors returned by an iteration visitor are not part of this enum: they
//! belong to the caller and are handed back verbatim by
//! [`KeyValueLogExt::for_each_log_entry`](crate::KeyValueLogExt::for_each_log_entry).

use crate::key::LogKey;
use thiserror::Error;

/// Errors produced by log store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key has no log, or its log is empty
    #[error("log not found: {key}")]
    NotFound {
        /// Key that was looked up
        key: LogKey,
    },

    /// The underlying medium failed (I/O, corruption, engine-specific)
    #[error("storage error: {0}")]
    Storage(String),

    /// The execution context was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// The execution context deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Result type for log store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a `NotFound` error for `key`.
    pub fn not_found(key: &LogKey) -> Self {
        Error::NotFound { key: key.clone() }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a storage (medium) failure.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if the operation was aborted by its context.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }
}
