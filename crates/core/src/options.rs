//! Pagination options for log iteration

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which slice of a log to visit
///
/// Entries are first arranged in visitation order (append order, or its
/// reverse when `descending`), then `offset` entries are skipped and at most
/// `limit` are visited.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `limit` | `None` | cap on entries visited (`Some(0)` visits nothing) |
/// | `offset` | `0` | entries skipped before visiting |
/// | `descending` | `false` | newest-appended first |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// Maximum number of entries to visit
    pub limit: Option<usize>,
    /// Number of entries to skip first
    pub offset: usize,
    /// Visit newest-appended first
    pub descending: bool,
}

impl FindOptions {
    /// All entries, append order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of entries visited.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip `offset` entries before visiting.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Visit newest-appended first.
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    /// Positions (in visitation order) selected from a log of `len` entries.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(len),
            None => len,
        };
        start..end
    }

    /// Indices into the append-ordered log, in visitation order.
    ///
    /// Backends holding the log as a slice can copy exactly these entries.
    pub fn append_indices(&self, len: usize) -> Range<usize> {
        let w = self.window(len);
        if self.descending {
            (len - w.end)..(len - w.start)
        } else {
            w
        }
    }
}
