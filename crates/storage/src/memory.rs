//! In-memory reference log store
//!
//! DashMap keyed by LogKey, one RwLock-guarded Vec per log.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, short shard locks only to find a log
//! - FxHash: fast non-crypto hash over the key bytes
//! - Per-key RwLock: appends to one key serialize on its write lock, so every
//!   log has a total append order; other keys never wait on it
//!
//! Readers copy the requested window out under the read lock, so a reader
//! never sees a half-appended entry and never holds a lock while the caller
//! visits entries.

use auditlog_core::traits::SnapshotEntries;
use auditlog_core::{
    Context, Error, FindOptions, KeyValueLog, LogEntries, LogEntry, LogKey, Result, Timestamp,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::debug;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// One key's entries, in append order
type SharedLog = Arc<RwLock<Vec<LogEntry>>>;

/// In-memory [`KeyValueLog`]
///
/// The reference implementation of the log contract and a drop-in test
/// double for persistent backends. Each instance owns its data; construct
/// one per test and call [`MemoryLog::clear`] to reset it.
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - appends to one key are linearized by that key's write lock
/// - appends to different keys never contend on a log lock
/// - reads take the key's read lock only long enough to copy entries
///
/// # Example
///
/// ```
/// use auditlog_core::{Context, KeyValueLog, LogKey, ResourceId, ResourceType};
/// use auditlog_storage::MemoryLog;
/// use chrono::Utc;
///
/// let store = MemoryLog::new();
/// let ctx = Context::background();
/// let key = LogKey::derive(&ResourceType::Dashboards, &ResourceId::new("42"));
///
/// store.add_log_entry(&ctx, &key, b"created", Utc::now()).unwrap();
/// assert_eq!(store.first_log_entry(&ctx, &key).unwrap().value, b"created");
/// ```
pub struct MemoryLog {
    logs: DashMap<LogKey, SharedLog, FxBuildHasher>,
}

impl MemoryLog {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            logs: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Create with room for `num_keys` logs
    pub fn with_capacity(num_keys: usize) -> Self {
        Self {
            logs: DashMap::with_capacity_and_hasher(num_keys, FxBuildHasher::default()),
        }
    }

    /// Drop every log.
    ///
    /// An append racing a clear lands either before it (and is dropped with
    /// the rest) or after it (in a fresh log); it is never written to a log
    /// that has already been removed.
    pub fn clear(&self) {
        let keys = self.logs.len();
        self.logs.clear();
        debug!("cleared {} logs", keys);
    }

    /// Number of keys that have a log
    pub fn key_count(&self) -> usize {
        self.logs.len()
    }

    /// Total entries across all logs
    pub fn total_entries(&self) -> usize {
        self.logs.iter().map(|log| log.value().read().len()).sum()
    }

    /// Check if a key has a log
    pub fn contains_key(&self, key: &LogKey) -> bool {
        self.logs.contains_key(key)
    }

    fn log(&self, key: &LogKey) -> Option<SharedLog> {
        self.logs.get(key).map(|log| Arc::clone(log.value()))
    }

    /// Push under the map guard so a concurrent `clear` cannot orphan the
    /// log between lookup and push. Returns the new length.
    fn append(&self, key: &LogKey, entry: LogEntry) -> usize {
        if let Some(log) = self.logs.get(key) {
            let mut entries = log.write();
            entries.push(entry);
            return entries.len();
        }
        let log = self.logs.entry(key.clone()).or_default();
        let mut entries = log.write();
        entries.push(entry);
        entries.len()
    }
}

impl Default for MemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLog")
            .field("key_count", &self.key_count())
            .field("total_entries", &self.total_entries())
            .finish()
    }
}

impl KeyValueLog for MemoryLog {
    fn add_log_entry(
        &self,
        ctx: &Context,
        key: &LogKey,
        value: &[u8],
        timestamp: Timestamp,
    ) -> Result<()> {
        ctx.check()?;
        let len = self.append(key, LogEntry::new(value, timestamp));
        debug!("appended entry {} to {}", len, key);
        Ok(())
    }

    fn first_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry> {
        ctx.check()?;
        let log = self.log(key).ok_or_else(|| Error::not_found(key))?;
        let entries = log.read();
        entries.first().cloned().ok_or_else(|| Error::not_found(key))
    }

    fn last_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry> {
        ctx.check()?;
        let log = self.log(key).ok_or_else(|| Error::not_found(key))?;
        let entries = log.read();
        entries.last().cloned().ok_or_else(|| Error::not_found(key))
    }

    fn log_entries(
        &self,
        ctx: &Context,
        key: &LogKey,
        options: FindOptions,
    ) -> Result<LogEntries<'_>> {
        ctx.check()?;
        let window = match self.log(key) {
            Some(log) => {
                let entries = log.read();
                let range = options.append_indices(entries.len());
                entries[range].to_vec()
            }
            None => Vec::new(),
        };
        Ok(SnapshotEntries::new(ctx, window, options.descending).boxed())
    }

    fn log_len(&self, ctx: &Context, key: &LogKey) -> Result<usize> {
        ctx.check()?;
        Ok(self.log(key).map(|log| log.read().len()).unwrap_or(0))
    }
}
