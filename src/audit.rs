//! Main entry point for recording and reading resource history.
//!
//! This module provides the `AuditLog` struct, which composes key
//! derivation, a log store and a clock into the operations resource services
//! and presentation layers actually call.

use crate::clock::{Clock, SystemClock};
use crate::config::AuditLogConfig;
use crate::error::Result;
use auditlog_core::{
    Context, FindOptions, KeyValueLog, LogKey, ResourceId, ResourceType, Timestamp,
};
use auditlog_storage::MemoryLog;
use chrono::SecondsFormat;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Render an instant as UTC RFC 3339 with whole seconds.
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(auditlog::format_timestamp(&t), "2024-01-01T00:00:00Z");
/// ```
pub fn format_timestamp(t: &Timestamp) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// When a resource was created and last modified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lifecycle {
    /// Timestamp of the first recorded event
    pub created_at: Timestamp,
    /// Timestamp of the last recorded event
    pub updated_at: Timestamp,
}

impl Lifecycle {
    /// Both instants as RFC 3339 strings, `(created_at, updated_at)`.
    pub fn to_rfc3339(&self) -> (String, String) {
        (
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at),
        )
    }
}

/// One event in a resource's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Event description (invalid UTF-8 replaced)
    pub description: String,
    /// When the event was recorded
    pub timestamp: Timestamp,
}

/// Per-resource audit history.
///
/// Create one with [`AuditLog::in_memory`] or [`AuditLog::builder`].
///
/// # Example
///
/// ```
/// use auditlog::prelude::*;
///
/// let audit = AuditLog::in_memory();
/// let ctx = audit.context();
/// let id = ResourceId::new("42");
///
/// audit.record_event(&ctx, &ResourceType::Dashboards, &id, "created")?;
/// audit.record_event(&ctx, &ResourceType::Dashboards, &id, "renamed")?;
///
/// let lifecycle = audit.lifecycle(&ctx, &ResourceType::Dashboards, &id)?;
/// assert!(lifecycle.created_at <= lifecycle.updated_at);
/// # Ok::<(), auditlog::Error>(())
/// ```
pub struct AuditLog {
    store: Arc<dyn KeyValueLog>,
    clock: Arc<dyn Clock>,
    config: AuditLogConfig,
}

impl AuditLog {
    /// An audit log over a fresh [`MemoryLog`], wall-clock time and default
    /// configuration.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryLog::new()),
            clock: Arc::new(SystemClock),
            config: AuditLogConfig::default(),
        }
    }

    /// Create a builder for custom stores, clocks and configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use auditlog::prelude::*;
    /// use chrono::Utc;
    ///
    /// let audit = AuditLog::builder()
    ///     .store(Arc::new(MemoryLog::new()))
    ///     .clock(Arc::new(FakeClock::new(Utc::now())))
    ///     .config(AuditLogConfig::from_toml_str("max_page_size = 50")?)
    ///     .build()?;
    /// # Ok::<(), auditlog::Error>(())
    /// ```
    pub fn builder() -> AuditLogBuilder {
        AuditLogBuilder::new()
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn KeyValueLog> {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &AuditLogConfig {
        &self.config
    }

    /// A fresh context carrying the configured operation timeout, if any.
    pub fn context(&self) -> Context {
        match self.config.operation_timeout() {
            Some(timeout) => Context::with_timeout(timeout),
            None => Context::background(),
        }
    }

    /// Record an event at the clock's current time.
    ///
    /// Returns the instant that was recorded.
    pub fn record_event(
        &self,
        ctx: &Context,
        resource_type: &ResourceType,
        resource_id: &ResourceId,
        description: &str,
    ) -> Result<Timestamp> {
        let now = self.clock.now();
        self.record_event_at(ctx, resource_type, resource_id, description, now)?;
        Ok(now)
    }

    /// Record an event at an explicit instant.
    ///
    /// The instant is stored as given. Appending out of chronological order
    /// makes "created" and "updated" follow append order, not time.
    pub fn record_event_at(
        &self,
        ctx: &Context,
        resource_type: &ResourceType,
        resource_id: &ResourceId,
        description: &str,
        time: Timestamp,
    ) -> Result<()> {
        let key = LogKey::derive(resource_type, resource_id);
        self.store
            .add_log_entry(ctx, &key, description.as_bytes(), time)?;
        debug!("recorded {:?} for {}/{}", description, resource_type, resource_id);
        Ok(())
    }

    /// When the resource was created and last modified.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: the resource has no recorded events
    /// - `Storage`, `Cancelled`, `DeadlineExceeded` from the store
    pub fn lifecycle(
        &self,
        ctx: &Context,
        resource_type: &ResourceType,
        resource_id: &ResourceId,
    ) -> Result<Lifecycle> {
        let key = LogKey::derive(resource_type, resource_id);
        let (created_at, updated_at) = self.store.created_and_updated_at(ctx, &key)?;
        Ok(Lifecycle {
            created_at,
            updated_at,
        })
    }

    /// A page of the resource's history.
    ///
    /// `options` are clamped by the configured page sizes. A resource with no
    /// events has an empty history.
    pub fn history(
        &self,
        ctx: &Context,
        resource_type: &ResourceType,
        resource_id: &ResourceId,
        options: FindOptions,
    ) -> Result<Vec<HistoryEntry>> {
        let key = LogKey::derive(resource_type, resource_id);
        let options = self.config.page(options);
        let mut history = Vec::with_capacity(options.limit.unwrap_or(0).min(1024));
        for entry in self.store.log_entries(ctx, &key, options)? {
            let entry = entry?;
            history.push(HistoryEntry {
                description: entry.value_lossy().into_owned(),
                timestamp: entry.timestamp,
            });
        }
        Ok(history)
    }

    /// Number of recorded events for the resource.
    pub fn event_count(
        &self,
        ctx: &Context,
        resource_type: &ResourceType,
        resource_id: &ResourceId,
    ) -> Result<usize> {
        let key = LogKey::derive(resource_type, resource_id);
        Ok(self.store.log_len(ctx, &key)?)
    }
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLog")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for an [`AuditLog`].
///
/// Unset parts default to a fresh [`MemoryLog`], [`SystemClock`] and
/// [`AuditLogConfig::default`].
#[derive(Default)]
pub struct AuditLogBuilder {
    store: Option<Arc<dyn KeyValueLog>>,
    clock: Option<Arc<dyn Clock>>,
    config: AuditLogConfig,
}

impl AuditLogBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `store` as the backing log store.
    pub fn store(mut self, store: Arc<dyn KeyValueLog>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `clock` for event timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use `config`.
    pub fn config(mut self, config: AuditLogConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and build.
    pub fn build(self) -> Result<AuditLog> {
        self.config.validate()?;
        Ok(AuditLog {
            store: self.store.unwrap_or_else(|| Arc::new(MemoryLog::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config,
        })
    }
}
