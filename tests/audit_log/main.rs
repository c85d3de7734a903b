//! Audit Log Comprehensive Test Suite
//!
//! Exercises the log store contract through `MemoryLog`, `FaultyLog` and the
//! `AuditLog` facade.
//!
//! ## Modules
//!
//! - `basic_ops`: append, first/last, lifecycle timestamps
//! - `pagination`: limit, offset, descending, page-size config
//! - `concurrency`: concurrent writers and readers
//! - `edge_cases`: empty logs, short-circuiting visitors, odd keys
//! - `faults`: storage failures, cancellation, deadlines
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test audit_log
//!
//! # Run pagination tests only
//! cargo test --test audit_log pagination::
//! ```

use std::sync::Arc;

use auditlog::prelude::*;
use chrono::{TimeZone, Utc};

pub mod concurrency;
pub mod pagination;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test-friendly tracing subscriber (idempotent)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Create a fresh reference store
pub fn create_store() -> Arc<MemoryLog> {
    init_tracing();
    Arc::new(MemoryLog::new())
}

/// Create a facade over `store` with a fake clock at 2024-01-01T00:00:00Z
pub fn create_audit(store: Arc<dyn KeyValueLog>) -> (AuditLog, Arc<FakeClock>) {
    let clock = Arc::new(FakeClock::new(day(1)));
    let audit = AuditLog::builder()
        .store(store)
        .clock(clock.clone())
        .build()
        .expect("default config is valid");
    (audit, clock)
}

/// Midnight UTC on the given day of January 2024
pub fn day(d: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

/// Key for dashboard `id`
pub fn dashboard(id: &str) -> LogKey {
    LogKey::derive(&ResourceType::Dashboards, &ResourceId::new(id))
}

/// Append `values` to `key`, one day apart starting at day 1
pub fn append_all(store: &dyn KeyValueLog, key: &LogKey, values: &[&str]) {
    let ctx = Context::background();
    for (i, v) in values.iter().enumerate() {
        store
            .add_log_entry(&ctx, key, v.as_bytes(), day(1 + i as u32))
            .unwrap();
    }
}

/// Collect visited values as strings
pub fn visit_values(store: &dyn KeyValueLog, key: &LogKey, options: FindOptions) -> Vec<String> {
    let mut out = Vec::new();
    store
        .for_each_log_entry(&Context::background(), key, options, |v, _| {
            out.push(String::from_utf8(v.to_vec()).unwrap());
            Ok::<(), auditlog_core::Error>(())
        })
        .unwrap();
    out
}
