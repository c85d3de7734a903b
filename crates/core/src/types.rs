//! Log entry type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instant attached to a log entry
pub type Timestamp = DateTime<Utc>;

/// One immutable record in a log
///
/// `value` is opaque to stores (typically a human-readable description).
/// `timestamp` is whatever the caller supplied; stores never reorder by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Caller-supplied payload
    pub value: Vec<u8>,
    /// Caller-supplied instant
    pub timestamp: Timestamp,
}

impl LogEntry {
    /// Create a new entry
    pub fn new(value: impl Into<Vec<u8>>, timestamp: Timestamp) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    /// Payload as text, replacing invalid UTF-8.
    pub fn value_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}
