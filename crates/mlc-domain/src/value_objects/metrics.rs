//! Read-only metrics snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hits per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierHits {
    /// Served from the process-local store
    pub l1: u64,
    /// Served from the distributed store
    pub l2: u64,
}

/// Point-in-time view of the metrics collector
///
/// Consumed by health monitoring. Counters reset only on process restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Hits over hits plus misses (0.0 when nothing was read)
    pub hit_rate: f64,
    /// Hits across both tiers
    pub total_hits: u64,
    /// Reads that missed both tiers
    pub total_misses: u64,
    /// Hits broken down by tier
    pub hits_by_tier: TierHits,
    /// Removed keys counted per invalidation reason
    pub invalidations_by_reason: BTreeMap<String, u64>,
    /// Keys populated by warming
    pub warming_event_count: u64,
    /// L2 hits copied into L1
    pub promotions: u64,
    /// Writes that reached fewer tiers than requested
    pub partial_write_failures: u64,
    /// Undecodable values dropped and deleted
    pub corrupt_entries: u64,
}

impl MetricsSnapshot {
    /// Total removed keys across every reason
    pub fn total_invalidations(&self) -> u64 {
        self.invalidations_by_reason.values().sum()
    }
}
