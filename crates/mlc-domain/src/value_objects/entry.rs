//! Cache entries and tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// One of the two cache layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Process-local entry store
    L1,
    /// Shared distributed store
    L2,
}

impl Tier {
    /// Lowercase label used in logs and metric labels
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value held by one tier
///
/// Entries are replaced, never updated: a `set` on an existing key builds a
/// new entry. Promotion from L2 to L1 copies the value into a fresh entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Key the entry is stored under
    pub key: String,
    /// Opaque serializable value
    pub value: serde_json::Value,
    /// Monotonic insertion time
    pub inserted_at: Instant,
    /// Time to live from insertion
    pub ttl: Duration,
    /// Tier owning the entry
    pub tier: Tier,
}

impl CacheEntry {
    /// Create an entry inserted now
    pub fn new<K: Into<String>>(key: K, value: serde_json::Value, ttl: Duration, tier: Tier) -> Self {
        Self {
            key: key.into(),
            value,
            inserted_at: Instant::now(),
            ttl,
            tier,
        }
    }

    /// Instant after which the entry is no longer served
    ///
    /// `None` when the TTL reaches past what `Instant` can represent; such
    /// an entry never expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.inserted_at.checked_add(self.ttl)
    }

    /// Whether the TTL has elapsed
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Whether the TTL has elapsed at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }

    /// Time left before expiry, `Duration::MAX` for entries that never expire
    pub fn remaining_ttl(&self) -> Duration {
        self.expires_at().map_or(Duration::MAX, |deadline| {
            deadline.saturating_duration_since(Instant::now())
        })
    }
}
