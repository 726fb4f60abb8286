//! Entry Store Port (L1)
//!
//! Process-local bounded store with least-recently-used eviction and
//! per-entry expiry.
//!
//! ## Contract
//!
//! - `get` never returns an entry whose TTL has elapsed and marks the entry
//!   as recently used.
//! - `set` evicts the least-recently-used entry when the store is full, so a
//!   write never fails for lack of room.
//! - `set` with a zero TTL stores nothing and drops any previous entry.
//! - `delete` is idempotent.
//! - Which entry goes first among equally old entries is unspecified.
//!
//! Implementations guard their map with a lock held only for the in-memory
//! mutation, never across an `.await`.

use async_trait::async_trait;
use std::time::Duration;

/// Predicate over keys used by bulk removal
pub type KeyMatcher<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// Entry Store Port
///
/// # Implementations
///
/// - **Lru**: count-bounded `lru::LruCache` (default)
/// - **Moka**: size-aware variant bounded by bytes
/// - **Null**: stores nothing, for L2-only setups and tests
#[async_trait]
pub trait EntryStore: Send + Sync + std::fmt::Debug {
    /// Get a live value, marking it recently used
    async fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: serde_json::Value, ttl: Duration);

    /// Remove a key
    ///
    /// # Returns
    /// True if a live entry was removed
    async fn delete(&self, key: &str) -> bool;

    /// Remove every key accepted by `matcher`
    ///
    /// # Returns
    /// Keys of the live entries removed
    async fn delete_matching(&self, matcher: KeyMatcher<'_>) -> Vec<String>;

    /// Keys currently held (expired entries may still be listed until swept)
    async fn keys(&self) -> Vec<String>;

    /// Number of entries currently held
    async fn entry_count(&self) -> usize;

    /// Drop every entry
    async fn clear(&self);

    /// Remove entries whose TTL has elapsed
    ///
    /// # Returns
    /// Number of entries removed
    async fn purge_expired(&self) -> usize;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
