//! In-memory distributed store
//!
//! Process-local implementation of the L2 contract backed by a [`DashMap`].
//! Several cache managers sharing one `Arc<MemoryDistributedStore>` behave
//! like instances sharing one Redis, which makes the store the standard
//! fixture for cross-instance tests.
//!
//! [`set_available`](MemoryDistributedStore::set_available) simulates an
//! outage: while unavailable every call fails with `Error::Unavailable`.

use crate::utils::glob_match;
use async_trait::async_trait;
use dashmap::DashMap;
use mlc_domain::error::{Error, Result};
use mlc_domain::ports::providers::DistributedStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredValue {
    bytes: Vec<u8>,
    /// `None` when the TTL overflows `Instant`
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// DashMap-backed distributed store
#[derive(Debug)]
pub struct MemoryDistributedStore {
    values: DashMap<String, StoredValue>,
    available: AtomicBool,
}

impl Default for MemoryDistributedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDistributedStore {
    /// Create an empty, available store
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle simulated availability
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether the store currently answers calls
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of live values, ignoring availability
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.values.iter().filter(|v| v.is_live(now)).count()
    }

    /// Whether the store holds no live values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::unavailable("memory distributed store is marked unavailable"))
        }
    }

    /// Store raw bytes under `key`, bypassing UTF-8 checks
    ///
    /// Mirrors a foreign writer putting arbitrary binary data in Redis.
    pub fn set_bytes(&self, key: &str, bytes: Vec<u8>, ttl: Duration) {
        self.values.insert(
            key.to_string(),
            StoredValue {
                bytes,
                expires_at: Instant::now().checked_add(ttl),
            },
        );
    }
}

#[async_trait]
impl DistributedStore for MemoryDistributedStore {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        let now = Instant::now();
        let live = self
            .values
            .get(key)
            .map(|stored| stored.is_live(now).then(|| stored.bytes.clone()));
        match live {
            Some(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| Error::corrupt(key, format!("value is not valid UTF-8: {e}"))),
            Some(None) => {
                self.values.remove_if(key, |_, stored| !stored.is_live(now));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.ensure_available()?;
        if ttl.is_zero() {
            self.values.remove(key);
            return Ok(());
        }
        self.values.insert(
            key.to_string(),
            StoredValue {
                bytes: value.as_bytes().to_vec(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.ensure_available()?;
        let now = Instant::now();
        Ok(self
            .values
            .remove(key)
            .is_some_and(|(_, stored)| stored.is_live(now)))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        self.ensure_available()?;
        let now = Instant::now();
        Ok(keys
            .iter()
            .filter_map(|key| self.values.remove(key))
            .filter(|(_, stored)| stored.is_live(now))
            .count())
    }

    async fn keys_matching(&self, glob: &str) -> Result<Vec<String>> {
        self.ensure_available()?;
        let now = Instant::now();
        Ok(self
            .values
            .iter()
            .filter(|entry| entry.is_live(now) && glob_match(glob, entry.key()))
            .map(|entry| entry.key().clone())
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_available()
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
