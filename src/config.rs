//! Facade configuration.
//!
//! ```toml
//! default_page_size = 100      # history page size when the caller sets no limit
//! max_page_size = 1000         # hard cap on any history page
//! operation_timeout_ms = 5000  # deadline for contexts built by AuditLog::context
//! ```
//!
//! Every field is optional; the default configuration leaves history
//! unpaginated and contexts without a deadline.

use crate::error::{Error, Result};
use auditlog_core::FindOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audit log facade settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditLogConfig {
    /// Page size applied when a history request sets no limit
    pub default_page_size: Option<usize>,
    /// Upper bound on any history page
    pub max_page_size: Option<usize>,
    /// Deadline for contexts from [`AuditLog::context`](crate::AuditLog::context)
    pub operation_timeout_ms: Option<u64>,
}

impl AuditLogConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Check the settings are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == Some(0) {
            return Err(Error::InvalidConfig("default_page_size must be positive".into()));
        }
        if self.max_page_size == Some(0) {
            return Err(Error::InvalidConfig("max_page_size must be positive".into()));
        }
        if let (Some(default), Some(max)) = (self.default_page_size, self.max_page_size) {
            if default > max {
                return Err(Error::InvalidConfig(format!(
                    "default_page_size {} exceeds max_page_size {}",
                    default, max
                )));
            }
        }
        if self.operation_timeout_ms == Some(0) {
            return Err(Error::InvalidConfig("operation_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Configured operation timeout.
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_ms.map(Duration::from_millis)
    }

    /// Apply page-size defaults and caps to caller options.
    pub fn page(&self, mut options: FindOptions) -> FindOptions {
        let limit = options.limit.or(self.default_page_size);
        options.limit = match (limit, self.max_page_size) {
            (Some(limit), Some(max)) => Some(limit.min(max)),
            (None, Some(max)) => Some(max),
            (limit, None) => limit,
        };
        options
    }
}
