//! LRU entry store
//!
//! Bounded process-local store built on [`lru::LruCache`]. Reads move the
//! entry to the most-recently-used position; writes into a full store evict
//! the least-recently-used entry.
//!
//! Expired entries are dropped lazily when touched, and in bulk by
//! [`EntryStore::purge_expired`], which the infrastructure layer runs on a
//! sweep interval.
//!
//! ## Example
//!
//! ```ignore
//! use mlc_providers::cache::LruEntryStore;
//!
//! let store = LruEntryStore::with_capacity(10_000);
//! ```

use async_trait::async_trait;
use lru::LruCache;
use mlc_domain::constants::DEFAULT_L1_CAPACITY;
use mlc_domain::ports::providers::{EntryStore, KeyMatcher};
use mlc_domain::value_objects::{CacheEntry, Tier};
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::trace;

/// Least-recently-used entry store
pub struct LruEntryStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
    capacity: NonZeroUsize,
}

impl Default for LruEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LruEntryStore {
    /// Create a store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_L1_CAPACITY)
    }

    /// Create a store holding at most `capacity` entries
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
        }
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

}

#[async_trait]
impl EntryStore for LruEntryStore {
    async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let mut entries = self.entries.lock();
        if ttl.is_zero() {
            entries.pop(key);
            return;
        }

        let entry = CacheEntry::new(key, value, ttl, Tier::L1);
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                trace!(key = %evicted, "evicted least-recently-used entry");
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries
            .lock()
            .pop(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    async fn delete_matching(&self, matcher: KeyMatcher<'_>) -> Vec<String> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let doomed: Vec<String> = entries
            .iter()
            .filter(|(key, _)| matcher(key))
            .map(|(key, _)| key.clone())
            .collect();
        doomed
            .into_iter()
            .filter_map(|key| entries.pop(&key).map(|entry| (key, entry)))
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key)
            .collect()
    }

    async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    async fn entry_count(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .count()
    }

    async fn clear(&self) {
        self.entries.lock().clear();
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    fn provider_name(&self) -> &str {
        "lru"
    }
}

impl std::fmt::Debug for LruEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruEntryStore")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
