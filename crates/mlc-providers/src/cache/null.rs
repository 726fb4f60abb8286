//! Null entry store
//!
//! Stores nothing. Used when L1 is disabled so every read goes to L2, and
//! in tests that must observe the distributed tier directly.

use async_trait::async_trait;
use mlc_domain::ports::providers::{EntryStore, KeyMatcher};
use std::time::Duration;

/// No-op entry store
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEntryStore;

impl NullEntryStore {
    /// Create a new null entry store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EntryStore for NullEntryStore {
    async fn get(&self, _key: &str) -> Option<serde_json::Value> {
        None
    }

    async fn set(&self, _key: &str, _value: serde_json::Value, _ttl: Duration) {}

    async fn delete(&self, _key: &str) -> bool {
        false
    }

    async fn delete_matching(&self, _matcher: KeyMatcher<'_>) -> Vec<String> {
        Vec::new()
    }

    async fn keys(&self) -> Vec<String> {
        Vec::new()
    }

    async fn entry_count(&self) -> usize {
        0
    }

    async fn clear(&self) {}

    async fn purge_expired(&self) -> usize {
        0
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
