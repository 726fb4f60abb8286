//! Cache metrics collector
//!
//! Atomic counters behind [`CacheManager::snapshot`], mirrored to the
//! `metrics` facade so an installed recorder (Prometheus, StatsD) sees the
//! same events. Counters only grow and reset on restart.
//!
//! [`CacheManager::snapshot`]: crate::cache::CacheManager::snapshot

use crate::constants::{
    METRIC_CACHE_CORRUPT_ENTRIES, METRIC_CACHE_HITS, METRIC_CACHE_INVALIDATIONS,
    METRIC_CACHE_MISSES, METRIC_CACHE_PARTIAL_WRITE_FAILURES, METRIC_CACHE_PROMOTIONS,
    METRIC_CACHE_WARMING_EVENTS,
};
use dashmap::DashMap;
use mlc_domain::value_objects::{MetricsSnapshot, Tier, TierHits};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters mutated only by the cache facade
#[derive(Debug, Default)]
pub struct CacheMetrics {
    l1_hits: AtomicU64,
    l2_hits: AtomicU64,
    misses: AtomicU64,
    invalidations: DashMap<String, u64>,
    warming_events: AtomicU64,
    promotions: AtomicU64,
    partial_write_failures: AtomicU64,
    corrupt_entries: AtomicU64,
}

impl CacheMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self, tier: Tier) {
        match tier {
            Tier::L1 => self.l1_hits.fetch_add(1, Ordering::Relaxed),
            Tier::L2 => self.l2_hits.fetch_add(1, Ordering::Relaxed),
        };
        metrics::counter!(METRIC_CACHE_HITS, "tier" => tier.as_str()).increment(1);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(METRIC_CACHE_MISSES).increment(1);
    }

    pub(crate) fn record_invalidation(&self, reason: &str, keys: usize) {
        let keys = keys as u64;
        *self.invalidations.entry(reason.to_string()).or_insert(0) += keys;
        metrics::counter!(METRIC_CACHE_INVALIDATIONS, "reason" => reason.to_string())
            .increment(keys);
    }

    pub(crate) fn record_warming_event(&self) {
        self.warming_events.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(METRIC_CACHE_WARMING_EVENTS).increment(1);
    }

    pub(crate) fn record_promotion(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(METRIC_CACHE_PROMOTIONS).increment(1);
    }

    pub(crate) fn record_partial_write_failure(&self) {
        self.partial_write_failures.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(METRIC_CACHE_PARTIAL_WRITE_FAILURES).increment(1);
    }

    pub(crate) fn record_corrupt_entry(&self) {
        self.corrupt_entries.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(METRIC_CACHE_CORRUPT_ENTRIES).increment(1);
    }

    /// Point-in-time copy of every counter
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let hits_by_tier = TierHits {
            l1: self.l1_hits.load(Ordering::Relaxed),
            l2: self.l2_hits.load(Ordering::Relaxed),
        };
        let total_hits = hits_by_tier.l1 + hits_by_tier.l2;
        let total_misses = self.misses.load(Ordering::Relaxed);
        let lookups = total_hits + total_misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            total_hits as f64 / lookups as f64
        };

        MetricsSnapshot {
            hit_rate,
            total_hits,
            total_misses,
            hits_by_tier,
            invalidations_by_reason: self
                .invalidations
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
            warming_event_count: self.warming_events.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            partial_write_failures: self.partial_write_failures.load(Ordering::Relaxed),
            corrupt_entries: self.corrupt_entries.load(Ordering::Relaxed),
        }
    }
}
