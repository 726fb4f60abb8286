//! Write options for the cache facade

use crate::value_objects::Tier;
use std::time::Duration;

/// Tiers a write goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierSet {
    /// L1 and L2
    #[default]
    Both,
    /// Process-local only
    L1Only,
    /// Shared store only
    L2Only,
}

impl TierSet {
    /// Whether the set includes `tier`
    pub fn includes(self, tier: Tier) -> bool {
        match (self, tier) {
            (Self::Both, _) | (Self::L1Only, Tier::L1) | (Self::L2Only, Tier::L2) => true,
            (Self::L1Only, Tier::L2) | (Self::L2Only, Tier::L1) => false,
        }
    }
}

/// Options for `set`
///
/// When `ttl` is `None` the TTL comes from the matching pattern, or the
/// configured default when no pattern matches.
///
/// ```
/// use mlc_domain::value_objects::{SetOptions, TierSet};
///
/// let options = SetOptions::default().with_ttl_secs(60).with_tiers(TierSet::L1Only);
/// assert_eq!(options.ttl.map(|t| t.as_secs()), Some(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetOptions {
    /// Explicit TTL override
    pub ttl: Option<Duration>,
    /// Target tiers
    pub tiers: TierSet,
}

impl SetOptions {
    /// Options with an explicit TTL
    pub fn ttl(ttl: Duration) -> Self {
        Self::default().with_ttl(ttl)
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }

    /// Set the target tiers
    pub fn with_tiers(mut self, tiers: TierSet) -> Self {
        self.tiers = tiers;
        self
    }
}
