//! Log key derivation
//!
//! Every resource's log lives under a key of the form
//! `{type}_{id}_auditlog`. Components are escaped so that the mapping
//! `(ResourceType, ResourceId) -> LogKey` is injective:
//!
//! | Byte | Encoded as |
//! |------|------------|
//! | `%`  | `%25` |
//! | `_`  | `%5F` |
//! | anything else | itself |
//!
//! Encoded components never contain `_`, so the first separator in a key
//! always ends the type component. Plain type names and hex IDs encode to
//! themselves, keeping the common-case key identical to the unescaped form.

use std::fmt;
use std::hash::{Hash, Hasher};

const SEPARATOR: u8 = b'_';
const SUFFIX: &[u8] = b"_auditlog";

/// Kind of resource that owns an audit log
///
/// Equality and hashing go through [`ResourceType::as_str`], so
/// `Custom("dashboards")` is the same type as `Dashboards`.
#[derive(Debug, Clone)]
pub enum ResourceType {
    /// Authorization tokens
    Authorizations,
    /// Buckets
    Buckets,
    /// Checks
    Checks,
    /// Dashboards
    Dashboards,
    /// Documents
    Documents,
    /// Labels
    Labels,
    /// Notification endpoints
    NotificationEndpoints,
    /// Notification rules
    NotificationRules,
    /// Organizations
    Orgs,
    /// Scraper targets
    Scrapers,
    /// Secrets
    Secrets,
    /// Data sources
    Sources,
    /// Tasks
    Tasks,
    /// Telegraf configurations
    Telegrafs,
    /// Users
    Users,
    /// Variables
    Variables,
    /// Views
    Views,
    /// Any other resource kind, by name
    Custom(String),
}

impl ResourceType {
    /// All built-in resource types.
    pub const BUILTIN: [ResourceType; 17] = [
        ResourceType::Authorizations,
        ResourceType::Buckets,
        ResourceType::Checks,
        ResourceType::Dashboards,
        ResourceType::Documents,
        ResourceType::Labels,
        ResourceType::NotificationEndpoints,
        ResourceType::NotificationRules,
        ResourceType::Orgs,
        ResourceType::Scrapers,
        ResourceType::Secrets,
        ResourceType::Sources,
        ResourceType::Tasks,
        ResourceType::Telegrafs,
        ResourceType::Users,
        ResourceType::Variables,
        ResourceType::Views,
    ];

    /// Stable name used in log keys.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Authorizations => "authorizations",
            ResourceType::Buckets => "buckets",
            ResourceType::Checks => "checks",
            ResourceType::Dashboards => "dashboards",
            ResourceType::Documents => "documents",
            ResourceType::Labels => "labels",
            ResourceType::NotificationEndpoints => "notificationEndpoints",
            ResourceType::NotificationRules => "notificationRules",
            ResourceType::Orgs => "orgs",
            ResourceType::Scrapers => "scrapers",
            ResourceType::Secrets => "secrets",
            ResourceType::Sources => "sources",
            ResourceType::Tasks => "tasks",
            ResourceType::Telegrafs => "telegrafs",
            ResourceType::Users => "users",
            ResourceType::Variables => "variables",
            ResourceType::Views => "views",
            ResourceType::Custom(name) => name,
        }
    }

    /// Resolve a name to a built-in type, falling back to `Custom`.
    pub fn from_name(name: &str) -> Self {
        Self::BUILTIN
            .iter()
            .find(|t| t.as_str() == name)
            .cloned()
            .unwrap_or_else(|| ResourceType::Custom(name.to_string()))
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ResourceType {}

impl Hash for ResourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        ResourceId(id.into())
    }

    /// Encode a numeric ID as 16 lowercase hex digits.
    ///
    /// ```
    /// use auditlog_core::ResourceId;
    ///
    /// assert_eq!(ResourceId::from_u64(42).as_str(), "000000000000002a");
    /// ```
    pub fn from_u64(id: u64) -> Self {
        ResourceId(format!("{:016x}", id))
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId(id)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key under which a resource's log is stored
///
/// Opaque to stores: they compare and hash the bytes, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogKey(Vec<u8>);

impl LogKey {
    /// Derive the log key for a resource.
    ///
    /// Pure and total: the same pair always yields the same key, and
    /// distinct pairs always yield distinct keys.
    ///
    /// ```
    /// use auditlog_core::{LogKey, ResourceId, ResourceType};
    ///
    /// let key = LogKey::derive(&ResourceType::Dashboards, &ResourceId::new("42"));
    /// assert_eq!(key.as_bytes(), b"dashboards_42_auditlog");
    /// ```
    pub fn derive(resource_type: &ResourceType, resource_id: &ResourceId) -> Self {
        let type_bytes = resource_type.as_str().as_bytes();
        let id_bytes = resource_id.as_str().as_bytes();

        let mut buf = Vec::with_capacity(type_bytes.len() + id_bytes.len() + 1 + SUFFIX.len());
        encode_component(type_bytes, &mut buf);
        buf.push(SEPARATOR);
        encode_component(id_bytes, &mut buf);
        buf.extend_from_slice(SUFFIX);
        LogKey(buf)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for LogKey {
    fn from(bytes: Vec<u8>) -> Self {
        LogKey(bytes)
    }
}

impl From<&[u8]> for LogKey {
    fn from(bytes: &[u8]) -> Self {
        LogKey(bytes.to_vec())
    }
}

impl AsRef<[u8]> for LogKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

fn encode_component(raw: &[u8], out: &mut Vec<u8>) {
    for &b in raw {
        match b {
            b'%' => out.extend_from_slice(b"%25"),
            b'_' => out.extend_from_slice(b"%5F"),
            _ => out.push(b),
        }
    }
}
