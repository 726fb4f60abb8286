//! Cache configuration types

use crate::constants::{
    DEFAULT_BUS_CAPACITY, DEFAULT_BUS_MAX_BACKOFF_SECS, DEFAULT_L1_MAX_BYTES,
    DEFAULT_MUTATION_QUEUE_CAPACITY, DEFAULT_REDIS_PORT, DEFAULT_SCAN_COUNT,
    DEFAULT_SWEEP_INTERVAL_MS,
};
use mlc_domain::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_INVALIDATION_CHANNEL, DEFAULT_L1_CAPACITY,
    DEFAULT_OPERATION_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// L1 entry store providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum L1Provider {
    /// Entry-count bounded LRU (default)
    #[default]
    Lru,
    /// Byte-bounded Moka cache
    Moka,
    /// L1 disabled
    Null,
}

/// L2 distributed store providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum L2Provider {
    /// Redis server
    Redis,
    /// In-process stand-in (default, single instance only)
    #[default]
    Memory,
    /// L2 disabled
    Null,
}

/// Invalidation bus providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusProvider {
    /// Redis pub/sub
    Redis,
    /// In-process broadcast channel (default)
    #[default]
    Tokio,
    /// Drop every message
    Null,
}

/// L1 entry store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct L1Config {
    /// Entry store provider
    pub provider: L1Provider,

    /// Maximum entries (LRU provider)
    pub capacity: usize,

    /// Maximum bytes of keys and values (Moka provider)
    pub max_bytes: u64,

    /// Interval between expiry sweeps, 0 disables the sweeper
    pub sweep_interval_ms: u64,
}

impl Default for L1Config {
    fn default() -> Self {
        Self {
            provider: L1Provider::Lru,
            capacity: DEFAULT_L1_CAPACITY,
            max_bytes: DEFAULT_L1_MAX_BYTES,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

impl L1Config {
    /// Sweep interval, `None` when disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }
}

/// L2 distributed store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct L2Config {
    /// Distributed store provider
    pub provider: L2Provider,

    /// Full connection URL, takes precedence over host/port/password/db
    pub url: Option<String>,

    /// Redis host
    pub host: Option<String>,

    /// Redis port
    pub port: u16,

    /// Redis password
    pub password: Option<String>,

    /// Redis logical database
    pub db: i64,

    /// Prefix applied to every key
    pub namespace: Option<String>,

    /// Deadline for a single L2 call
    pub operation_timeout_ms: u64,

    /// `COUNT` hint per `SCAN`
    pub scan_count: usize,
}

impl Default for L2Config {
    fn default() -> Self {
        Self {
            provider: L2Provider::Memory,
            url: None,
            host: None,
            port: DEFAULT_REDIS_PORT,
            password: None,
            db: 0,
            namespace: None,
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
            scan_count: DEFAULT_SCAN_COUNT,
        }
    }
}

impl L2Config {
    /// Redis configuration for a URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            provider: L2Provider::Redis,
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Connection URL, built from host/port/password/db when `url` is unset
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        let host = self.host.as_ref()?;
        let auth = self
            .password
            .as_ref()
            .map(|password| format!(":{password}@"))
            .unwrap_or_default();
        Some(format!("redis://{auth}{host}:{}/{}", self.port, self.db))
    }

    /// Operation timeout as a `Duration`
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Invalidation bus configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BusConfig {
    /// Bus provider
    pub provider: BusProvider,

    /// Pub/sub channel name
    pub channel: String,

    /// Per-subscriber buffer (Tokio provider)
    pub capacity: usize,

    /// Cap on resubscribe backoff (Redis provider)
    pub max_backoff_secs: u64,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            provider: BusProvider::Tokio,
            channel: DEFAULT_INVALIDATION_CHANNEL.to_string(),
            capacity: DEFAULT_BUS_CAPACITY,
            max_backoff_secs: DEFAULT_BUS_MAX_BACKOFF_SECS,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL used when neither the caller nor a pattern gives one
    pub default_ttl_secs: u64,

    /// Bound of the mutation event queue
    pub mutation_queue_capacity: usize,

    /// L1 section
    pub l1: L1Config,

    /// L2 section
    pub l2: L2Config,

    /// Bus section
    pub bus: BusConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            mutation_queue_capacity: DEFAULT_MUTATION_QUEUE_CAPACITY,
            l1: L1Config::default(),
            l2: L2Config::default(),
            bus: BusConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Default TTL as a `Duration`
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}
