//! # auditlog
//!
//! Append-only, per-resource audit logs over any ordered key-value store.
//!
//! Every trackable resource (a [`ResourceType`] plus an opaque
//! [`ResourceId`]) owns a log of timestamped entries. The log answers three
//! questions cheaply: when was the resource created, when was it last
//! modified, and what is its full history.
//!
//! ## Quick Start
//!
//! ```
//! use auditlog::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let audit = AuditLog::in_memory();
//! let ctx = audit.context();
//! let id = ResourceId::new("42");
//!
//! let jan1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let jan2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
//! audit.record_event_at(&ctx, &ResourceType::Dashboards, &id, "created", jan1)?;
//! audit.record_event_at(&ctx, &ResourceType::Dashboards, &id, "renamed", jan2)?;
//!
//! let lifecycle = audit.lifecycle(&ctx, &ResourceType::Dashboards, &id)?;
//! assert_eq!(lifecycle.created_at, jan1);
//! assert_eq!(lifecycle.updated_at, jan2);
//!
//! let history = audit.history(&ctx, &ResourceType::Dashboards, &id, FindOptions::new())?;
//! assert_eq!(history.len(), 2);
//! # Ok::<(), auditlog::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`auditlog_core`] - key derivation, the [`KeyValueLog`] contract, errors
//! - [`auditlog_storage`] - [`MemoryLog`] reference store, [`FaultyLog`]
//! - this crate - [`AuditLog`] facade, configuration, clocks

#![warn(missing_docs)]

mod audit;
mod clock;
mod config;
mod error;

pub mod prelude;

// Re-export main entry points
pub use audit::{format_timestamp, AuditLog, AuditLogBuilder, HistoryEntry, Lifecycle};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::AuditLogConfig;
pub use error::{Error, Result};

// Re-export the store layer
pub use auditlog_core::{
    CancelHandle, Context, FindOptions, KeyValueLog, KeyValueLogExt, LogEntry, LogKey,
    ResourceId, ResourceType, Timestamp,
};
pub use auditlog_storage::{FaultyLog, MemoryLog};
