// kv-namespace/src/domain.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Representation requested from a remote get
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Stream,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Stream => "stream",
        }
    }
}

/// Options for a point get. Zero means "use the service default".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOptions {
    /// Edge cache TTL in seconds
    pub cache_ttl: u64,
}

impl GetOptions {
    pub fn with_cache_ttl(cache_ttl: u64) -> Self {
        Self { cache_ttl }
    }
}

/// Options for a single list page. Empty fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub limit: u64,
    pub prefix: String,
    /// Opaque token from a previous [`ListResult`]
    pub cursor: String,
}

impl ListOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }
}

/// Options for a put.
///
/// Both fields may be set; which one wins is up to the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutOptions {
    /// Absolute expiration in seconds since the UNIX epoch
    pub expiration: u64,
    /// Expiration relative to now, in seconds
    pub expiration_ttl: u64,
}

impl PutOptions {
    /// Expire at the given instant; instants before the epoch leave it unset
    pub fn expire_at(mut self, at: DateTime<Utc>) -> Self {
        self.expiration = u64::try_from(at.timestamp()).unwrap_or(0);
        self
    }

    /// Expire after the given duration (whole seconds)
    pub fn expire_after(mut self, ttl: Duration) -> Self {
        self.expiration_ttl = ttl.as_secs();
        self
    }
}

/// A key returned by a list call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKey {
    pub name: String,
    /// Expiration in seconds since the UNIX epoch; `0` means no expiration
    pub expiration: u64,
}

impl ListKey {
    pub fn new(name: impl Into<String>, expiration: u64) -> Self {
        Self {
            name: name.into(),
            expiration,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expiration == 0 {
            return None;
        }
        i64::try_from(self.expiration)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// One page of a listing
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult {
    /// Keys in the order the service returned them
    pub keys: Vec<ListKey>,
    pub list_complete: bool,
    /// Continuation token; empty once the listing is complete
    pub cursor: String,
}

impl ListResult {
    /// Options for the page after this one, keeping the previous prefix and limit.
    /// Returns `None` when the listing is complete.
    pub fn next_page_options(&self, previous: Option<&ListOptions>) -> Option<ListOptions> {
        if self.list_complete {
            return None;
        }
        let next = previous.cloned().unwrap_or_default();
        Some(next.with_cursor(self.cursor.clone()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.name.as_str())
    }
}
