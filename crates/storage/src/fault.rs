//! A [`KeyValueLog`] wrapper that injects storage failures and latency.
//!
//! `FaultyLog` wraps any `Arc<dyn KeyValueLog>` and makes it misbehave the
//! way a real medium can: appends that start failing after a quota, reads
//! that fail outright, an entry that turns out corrupt mid-iteration, and
//! slow operations that outlive their context deadline.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use auditlog_storage::{FaultyLog, MemoryLog};
//!
//! let faulty = FaultyLog::new(Arc::new(MemoryLog::new()))
//!     .fail_writes_after(3)       // 4th append onwards fails
//!     .corrupt_entry_at(1)        // 2nd visited entry is corrupt
//!     .latency(Duration::from_millis(5));
//! ```

use auditlog_core::{
    Context, Error, FindOptions, KeyValueLog, LogEntries, LogEntry, LogKey, Result, Timestamp,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A [`KeyValueLog`] wrapper that injects failures before delegating.
///
/// Failures surface as [`Error::Storage`] and are never retried.
pub struct FaultyLog {
    inner: Arc<dyn KeyValueLog>,
    write_quota: Option<u64>,
    writes: AtomicU64,
    fail_reads: AtomicBool,
    corrupt_at: Option<usize>,
    latency: Duration,
}

impl FaultyLog {
    /// Wrap an existing store with no faults (pass-through) by default.
    pub fn new(inner: Arc<dyn KeyValueLog>) -> Self {
        Self {
            inner,
            write_quota: None,
            writes: AtomicU64::new(0),
            fail_reads: AtomicBool::new(false),
            corrupt_at: None,
            latency: Duration::ZERO,
        }
    }

    /// Let `n` appends through, then fail every later one.
    pub fn fail_writes_after(mut self, n: u64) -> Self {
        self.write_quota = Some(n);
        self
    }

    /// Fail every read (first, last, iteration).
    pub fn fail_reads(self, fail: bool) -> Self {
        self.set_fail_reads(fail);
        self
    }

    /// Toggle read failures on a live store.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Release);
    }

    /// Yield a corruption error in place of the `n`th visited entry
    /// (zero-based), ending the iteration there.
    pub fn corrupt_entry_at(mut self, n: usize) -> Self {
        self.corrupt_at = Some(n);
        self
    }

    /// Sleep this long before every operation.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Appends attempted so far, failed ones included.
    pub fn write_attempts(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }

    /// Simulated I/O wait, after which the context decides whether to go on.
    fn delay(&self, ctx: &Context) -> Result<()> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        ctx.check()
    }

    fn check_read(&self, key: &LogKey) -> Result<()> {
        if self.fail_reads.load(Ordering::Acquire) {
            warn!("injected read failure on {}", key);
            return Err(Error::Storage(format!("injected read failure on {}", key)));
        }
        Ok(())
    }
}

impl std::fmt::Debug for FaultyLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultyLog")
            .field("write_quota", &self.write_quota)
            .field("write_attempts", &self.write_attempts())
            .field("fail_reads", &self.fail_reads.load(Ordering::Acquire))
            .field("corrupt_at", &self.corrupt_at)
            .field("latency", &self.latency)
            .finish()
    }
}

impl KeyValueLog for FaultyLog {
    fn add_log_entry(
        &self,
        ctx: &Context,
        key: &LogKey,
        value: &[u8],
        timestamp: Timestamp,
    ) -> Result<()> {
        self.delay(ctx)?;
        let attempt = self.writes.fetch_add(1, Ordering::AcqRel);
        if let Some(quota) = self.write_quota {
            if attempt >= quota {
                warn!("injected write failure on {} (attempt {})", key, attempt + 1);
                return Err(Error::Storage(format!("injected write failure on {}", key)));
            }
        }
        self.inner.add_log_entry(ctx, key, value, timestamp)
    }

    fn first_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry> {
        self.delay(ctx)?;
        self.check_read(key)?;
        self.inner.first_log_entry(ctx, key)
    }

    fn last_log_entry(&self, ctx: &Context, key: &LogKey) -> Result<LogEntry> {
        self.delay(ctx)?;
        self.check_read(key)?;
        self.inner.last_log_entry(ctx, key)
    }

    fn log_entries(
        &self,
        ctx: &Context,
        key: &LogKey,
        options: FindOptions,
    ) -> Result<LogEntries<'_>> {
        self.delay(ctx)?;
        self.check_read(key)?;
        let entries = self.inner.log_entries(ctx, key, options)?;
        let Some(corrupt_at) = self.corrupt_at else {
            return Ok(entries);
        };

        let key = key.clone();
        let mut failed = false;
        let iter = entries.enumerate().map_while(move |(i, entry)| {
            if failed {
                return None;
            }
            if i == corrupt_at {
                failed = true;
                warn!("injected corrupt entry {} in {}", i, key);
                return Some(Err(Error::Storage(format!(
                    "corrupt entry {} in {}",
                    i, key
                ))));
            }
            Some(entry)
        });
        Ok(Box::new(iter))
    }
}
