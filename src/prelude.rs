//! Convenient imports for auditlog.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use auditlog::prelude::*;
//!
//! let audit = AuditLog::in_memory();
//! audit.record_event(&audit.context(), &ResourceType::Tasks, &ResourceId::from_u64(1), "created")?;
//! # Ok::<(), auditlog::Error>(())
//! ```

// Main entry point
pub use crate::audit::{AuditLog, AuditLogBuilder, HistoryEntry, Lifecycle};

// Error handling
pub use crate::error::{Error, Result};

// Configuration and time
pub use crate::clock::{Clock, FakeClock, SystemClock};
pub use crate::config::AuditLogConfig;

// Store layer
pub use auditlog_core::{
    Context, FindOptions, KeyValueLog, KeyValueLogExt, LogEntry, LogKey, ResourceId,
    ResourceType, Timestamp,
};
pub use auditlog_storage::{FaultyLog, MemoryLog};
