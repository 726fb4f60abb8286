//! Moka entry store
//!
//! Size-aware L1 built on Moka. Capacity is a byte budget: each entry is
//! weighed by its key plus serialized value, and Moka evicts by recency
//! once the budget is exceeded. Expiry is per entry through an [`Expiry`]
//! policy, so Moka drops stale values on its own maintenance cycle.
//!
//! ## Example
//!
//! ```ignore
//! use mlc_providers::cache::MokaEntryStore;
//!
//! // 64MB of cached JSON
//! let store = MokaEntryStore::with_max_bytes(64 * 1024 * 1024);
//! ```

use crate::constants::MOKA_DEFAULT_MAX_BYTES;
use async_trait::async_trait;
use mlc_domain::ports::providers::{EntryStore, KeyMatcher};
use mlc_domain::value_objects::{CacheEntry, Tier};
use moka::Expiry;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest TTL handed to moka; longer ones mean no expiry
const LONGEST_TRACKED_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn moka_ttl(entry: &CacheEntry) -> Option<Duration> {
    (entry.ttl <= LONGEST_TRACKED_TTL).then_some(entry.ttl)
}

/// Expires each entry after its own TTL
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        moka_ttl(value)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        moka_ttl(value)
    }
}

#[allow(clippy::ptr_arg)]
fn entry_weight(key: &String, entry: &CacheEntry) -> u32 {
    let bytes = key.len() + entry.value.to_string().len();
    u32::try_from(bytes).unwrap_or(u32::MAX)
}

/// Moka-based entry store bounded by bytes
#[derive(Clone)]
pub struct MokaEntryStore {
    cache: Cache<String, CacheEntry>,
    max_bytes: u64,
}

impl Default for MokaEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaEntryStore {
    /// Create a store with the default byte budget
    pub fn new() -> Self {
        Self::with_max_bytes(MOKA_DEFAULT_MAX_BYTES)
    }

    /// Create a store holding at most `max_bytes` of keys and values
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_bytes)
            .weigher(entry_weight)
            .eviction_policy(EvictionPolicy::lru())
            .expire_after(EntryExpiry)
            .build();

        Self { cache, max_bytes }
    }

    /// Byte budget
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    async fn remove_keys(&self, keys: Vec<Arc<String>>) -> Vec<String> {
        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(entry) = self.cache.remove(key.as_str()).await
                && !entry.is_expired()
            {
                removed.push(entry.key);
            }
        }
        removed
    }
}

#[async_trait]
impl EntryStore for MokaEntryStore {
    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.cache
            .get(key)
            .await
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value)
    }

    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        if ttl.is_zero() {
            self.cache.invalidate(key).await;
            return;
        }
        let entry = CacheEntry::new(key, value, ttl, Tier::L1);
        self.cache.insert(key.to_string(), entry).await;
    }

    async fn delete(&self, key: &str) -> bool {
        self.cache.remove(key).await.is_some()
    }

    async fn delete_matching(&self, matcher: KeyMatcher<'_>) -> Vec<String> {
        let doomed: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter(|(key, _)| matcher(key.as_str()))
            .map(|(key, _)| key)
            .collect();
        self.remove_keys(doomed).await
    }

    async fn keys(&self) -> Vec<String> {
        self.cache
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.as_ref().clone())
            .collect()
    }

    async fn entry_count(&self) -> usize {
        // Run pending tasks so entry_count reflects evictions and expiry
        self.cache.run_pending_tasks().await;
        usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX)
    }

    async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    async fn purge_expired(&self) -> usize {
        let before = self.cache.entry_count();
        self.cache.run_pending_tasks().await;
        let after = self.cache.entry_count();
        usize::try_from(before.saturating_sub(after)).unwrap_or(usize::MAX)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaEntryStore")
            .field("max_bytes", &self.max_bytes)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
