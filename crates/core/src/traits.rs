//! The log store contract
//!
//! [`KeyValueLog`] is the capability every backend implements: the
//! in-memory reference store, fault-injecting wrappers, and any persistent
//! engine. Callers hold `&dyn KeyValueLog` or `Arc<dyn KeyValueLog>` and never
//! see backend internals.
//!
//! ## Ordering
//!
//! A log is ordered by **append order**. Timestamps are carried, never
//! sorted on: "first" means first appended and "last" means last appended,
//! whatever the timestamps say.
//!
//! ## Error Handling
//!
//! | Operation | Absent / empty log | Medium failure | Context aborted |
//! |-----------|--------------------|----------------|-----------------|
//! | `add_log_entry` | creates the log | `Storage` | `Cancelled` / `DeadlineExceeded` |
//! | `first_log_entry` | `NotFound` | `Storage` | `Cancelled` / `DeadlineExceeded` |
//! | `last_log_entry` | `NotFound` | `Storage` | `Cancelled` / `DeadlineExceeded` |
//! | `log_entries` | empty iterator | `Storage` | `Cancelled` / `DeadlineExceeded` |

use crate::context::Context;
use crate::error::{Error, Result};
use crate::key::LogKey;
use crate::options::FindOptions;
use crate::types::{LogEntry, Timestamp};

/// Lazy sequence of log entries
///
/// Yields `Err` at most once, then ends.
pub type LogEntries<'a> = Box<dyn Iterator<Item = Result<LogEntry>> + Send + 'a>;

/// Append-only per-key log storage
///
/// ## Contract
///
/// - Appends to the same key are linearized: every key has a total append order
/// - Appends to different keys are independent
/// - Reads observe a consistent snapshot; they may miss appends that race them
/// - No operation retries internally; failures go straight to the caller
pub trait KeyValueLog: Send + Sync {
    /// Append `(value, timestamp)` to the log at `key`, creating it if absent.
    ///
    /// ## Errors
    ///
    /// - `Storage`: the underlying medium failed
    /// - `Cancelled` / `DeadlineExceeded`: `ctx` aborted the operation
    fn add_log_entry(
        &self,
        ctx: &Context,
        key: &LogKey,
        value: &[u8],
        timestamp: Timestamp,
    ) -> Result<()>;

    /// The earliest-appended entry at `key`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no log at `key`, or the log is empty
    /// - `Storage`, `Cancelled`, `DeadlineExceeded`
    fn first_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry>;

    /// The most recently appended entry at `key`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no log at `key`, or the log is empty
    /// - `Storage`, `Cancelled`, `DeadlineExceeded`
    fn last_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry>;

    /// Entries at `key` selected by `options`, in visitation order.
    ///
    /// An absent key yields an empty sequence, not `NotFound`. Implementations
    /// check `ctx` when called, and the returned iterator re-checks it before
    /// taking each remaining entry.
    fn log_entries(
        &self,
        ctx: &Context,
        key: &LogKey,
        options: FindOptions,
    ) -> Result<LogEntries<'_>>;

    /// Number of entries at `key` (zero when absent).
    fn log_len(&self, ctx: &Context, key: &LogKey) -> Result<usize> {
        let mut count = 0;
        for entry in self.log_entries(ctx, key, FindOptions::default())? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    /// Creation and last-modification instants of the log at `key`.
    ///
    /// These are the timestamps of the first- and last-appended entries. A
    /// single-entry log returns the same instant twice. If the first lookup
    /// fails, its error is returned and the second lookup is not attempted.
    fn created_and_updated_at(&self, ctx: &Context, key: &LogKey) -> Result<(Timestamp, Timestamp)> {
        let created = self.first_log_entry(ctx, key)?;
        let updated = self.last_log_entry(ctx, key)?;
        Ok((created.timestamp, updated.timestamp))
    }
}

/// Visitor-style iteration over [`KeyValueLog`] entries
///
/// Implemented for every `KeyValueLog`, including trait objects.
pub trait KeyValueLogExt: KeyValueLog {
    /// Call `visit(value, timestamp)` for each entry selected by `options`.
    ///
    /// If `visit` fails, iteration stops at once and its error is returned
    /// unchanged. Store failures are converted into `E`. An absent key visits
    /// nothing and succeeds.
    ///
    /// ```
    /// use auditlog_core::{Context, Error, FindOptions, KeyValueLog, KeyValueLogExt, LogKey};
    ///
    /// fn count_created(log: &dyn KeyValueLog, key: &LogKey) -> Result<usize, Error> {
    ///     let mut n = 0;
    ///     log.for_each_log_entry(&Context::background(), key, FindOptions::new(), |value, _| {
    ///         if value == b"created" {
    ///             n += 1;
    ///         }
    ///         Ok::<(), Error>(())
    ///     })?;
    ///     Ok(n)
    /// }
    /// ```
    fn for_each_log_entry<E, F>(
        &self,
        ctx: &Context,
        key: &LogKey,
        options: FindOptions,
        mut visit: F,
    ) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnMut(&[u8], Timestamp) -> std::result::Result<(), E>,
    {
        for entry in self.log_entries(ctx, key, options)? {
            let entry = entry?;
            visit(&entry.value, entry.timestamp)?;
        }
        Ok(())
    }
}

impl<T: KeyValueLog + ?Sized> KeyValueLogExt for T {}

/// Iterator over an owned snapshot of a log window
///
/// Backends that copy the selected entries out under a lock can hand them
/// back through this type. Entries must be in append order; `descending`
/// reverses them.
///
/// The context is checked before each remaining entry is taken, so an
/// aborted context leaves the rest of the window untouched. An exhausted
/// window ends with `None` without consulting the context; backends check it
/// once when the iteration is opened.
#[derive(Debug)]
pub struct SnapshotEntries {
    ctx: Context,
    entries: std::vec::IntoIter<LogEntry>,
    descending: bool,
    done: bool,
}

impl SnapshotEntries {
    /// Wrap an append-ordered window.
    pub fn new(ctx: &Context, entries: Vec<LogEntry>, descending: bool) -> Self {
        Self {
            ctx: ctx.clone(),
            entries: entries.into_iter(),
            descending,
            done: false,
        }
    }

    /// Box as [`LogEntries`].
    pub fn boxed<'a>(self) -> LogEntries<'a> {
        Box::new(self)
    }
}

impl Iterator for SnapshotEntries {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.entries.len() == 0 {
            return None;
        }
        if let Err(e) = self.ctx.check() {
            self.done = true;
            return Some(Err(e));
        }
        let next = if self.descending {
            self.entries.next_back()
        } else {
            self.entries.next()
        }?;
        Some(Ok(next))
    }
}

impl std::iter::FusedIterator for SnapshotEntries {}
