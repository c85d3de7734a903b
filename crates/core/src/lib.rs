//! Core types for the audit log layer
//!
//! This crate fixes the contract every log backend must honor:
//! - [`LogKey`]: deterministic key derivation from a resource type and ID
//! - [`LogEntry`]: immutable `(value, timestamp)` record
//! - [`KeyValueLog`]: append / first / last / iterate over a per-key log
//! - [`FindOptions`]: pagination for iteration
//! - [`Context`]: cancellation and deadlines for blocking operations
//! - [`Error`]: the error taxonomy shared by all backends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod key;
pub mod options;
pub mod traits;
pub mod types;

pub use context::{CancelHandle, Context};
pub use error::{Error, Result};
pub use key::{LogKey, ResourceId, ResourceType};
pub use options::FindOptions;
pub use traits::{KeyValueLog, KeyValueLogExt, LogEntries};
pub use types::{LogEntry, Timestamp};
