//! Log store backends
//!
//! This crate implements the [`KeyValueLog`](auditlog_core::KeyValueLog)
//! contract with:
//! - MemoryLog: DashMap-sharded reference store with per-key locks
//! - FaultyLog: wrapper injecting storage failures and latency

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fault;
pub mod memory;

pub use fault::FaultyLog;
pub use memory::MemoryLog;
