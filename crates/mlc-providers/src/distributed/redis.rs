//! Redis distributed store
//!
//! L2 backed by Redis. The connection is a [`ConnectionManager`], opened on
//! first use and reconnecting on its own afterwards. Every command runs
//! under a hard deadline and transport failures surface as
//! `Error::Unavailable`, so a slow or missing Redis degrades reads to
//! misses instead of stalling callers.
//!
//! Pattern scans use incremental `SCAN ... MATCH` rather than `KEYS`.
//!
//! ## Example
//!
//! ```ignore
//! use mlc_providers::distributed::{RedisDistributedStore, RedisStoreOptions};
//!
//! let store = RedisDistributedStore::new("redis://localhost:6379", RedisStoreOptions::default())?;
//! ```

use crate::constants::REDIS_SCAN_DEFAULT_COUNT;
use crate::utils::redis::{open_client, with_timeout};
use async_trait::async_trait;
use mlc_domain::constants::DEFAULT_OPERATION_TIMEOUT_MS;
use mlc_domain::error::{Error, Result};
use mlc_domain::ports::providers::DistributedStore;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Tuning knobs for [`RedisDistributedStore`]
#[derive(Debug, Clone)]
pub struct RedisStoreOptions {
    /// Prefix prepended as `<namespace>:` to every key
    pub namespace: Option<String>,
    /// Deadline for a single command, connection setup included
    pub operation_timeout: Duration,
    /// `COUNT` hint per `SCAN` round trip
    pub scan_count: usize,
}

impl Default for RedisStoreOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            operation_timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
            scan_count: REDIS_SCAN_DEFAULT_COUNT,
        }
    }
}

/// Redis-backed distributed store
pub struct RedisDistributedStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    options: RedisStoreOptions,
}

impl RedisDistributedStore {
    /// Create a store for a Redis URL
    ///
    /// No connection is made until the first command.
    pub fn new(url: &str, options: RedisStoreOptions) -> Result<Self> {
        Ok(Self {
            client: open_client(url)?,
            connection: OnceCell::new(),
            options,
        })
    }

    /// Create a store with host and port
    pub fn with_host_port(host: &str, port: u16, options: RedisStoreOptions) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"), options)
    }

    /// Configured namespace, if any
    pub fn namespace(&self) -> Option<&str> {
        self.options.namespace.as_deref()
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = with_timeout(
                    "CONNECT",
                    self.options.operation_timeout,
                    ConnectionManager::new(self.client.clone()),
                )
                .await?;
                info!("Connected to Redis distributed store");
                Ok::<_, Error>(manager)
            })
            .await?;
        Ok(manager.clone())
    }

    fn namespaced(&self, key: &str) -> String {
        match &self.options.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_string(),
        }
    }

    fn strip_namespace(&self, key: String) -> String {
        match &self.options.namespace {
            Some(namespace) => key
                .strip_prefix(namespace.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .map_or_else(|| key.clone(), str::to_string),
            None => key,
        }
    }

    fn namespaced_glob(&self, glob: &str) -> String {
        match &self.options.namespace {
            Some(namespace) => format!("{}:{glob}", escape_glob(namespace)),
            None => glob.to_string(),
        }
    }
}

/// Longest TTL sent as an expiry; longer ones store the key without one
const LONGEST_EXPIRY: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn expiry_millis(ttl: Duration) -> Option<u64> {
    if ttl > LONGEST_EXPIRY {
        return None;
    }
    u64::try_from(ttl.as_millis()).ok()
}

fn decode_value(key: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| Error::corrupt(key, format!("value is not valid UTF-8: {e}")))
}

fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl DistributedStore for RedisDistributedStore {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let namespaced = self.namespaced(key);
        let bytes = with_timeout(
            "GET",
            self.options.operation_timeout,
            conn.get::<_, Option<Vec<u8>>>(&namespaced),
        )
        .await?;
        bytes.map(|bytes| decode_value(key, bytes)).transpose()
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let key = self.namespaced(key);
        if ttl.is_zero() {
            with_timeout(
                "DEL",
                self.options.operation_timeout,
                conn.del::<_, ()>(&key),
            )
            .await?;
            return Ok(());
        }

        match expiry_millis(ttl) {
            Some(millis) => {
                with_timeout(
                    "PSETEX",
                    self.options.operation_timeout,
                    conn.pset_ex::<_, _, ()>(&key, value, millis),
                )
                .await
            }
            None => {
                with_timeout(
                    "SET",
                    self.options.operation_timeout,
                    conn.set::<_, _, ()>(&key, value),
                )
                .await
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let key = self.namespaced(key);
        let removed = with_timeout(
            "DEL",
            self.options.operation_timeout,
            conn.del::<_, usize>(&key),
        )
        .await?;
        Ok(removed > 0)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        let keys: Vec<String> = keys.iter().map(|key| self.namespaced(key)).collect();
        with_timeout(
            "DEL",
            self.options.operation_timeout,
            conn.del::<_, usize>(&keys),
        )
        .await
    }

    async fn keys_matching(&self, glob: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let glob = self.namespaced_glob(glob);
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = with_timeout(
                "SCAN",
                self.options.operation_timeout,
                redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(&glob)
                    .arg("COUNT")
                    .arg(self.options.scan_count)
                    .query_async(&mut conn),
            )
            .await?;

            keys.extend(batch.into_iter().map(|key| self.strip_namespace(key)));
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once across iterations
        keys.sort_unstable();
        keys.dedup();
        debug!(glob = %glob, matched = keys.len(), "Redis scan complete");
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = with_timeout(
            "PING",
            self.options.operation_timeout,
            redis::cmd("PING").query_async(&mut conn),
        )
        .await?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisDistributedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDistributedStore")
            .field("namespace", &self.options.namespace)
            .field("connected", &self.connection.initialized())
            .field("operation_timeout", &self.options.operation_timeout)
            .finish_non_exhaustive()
    }
}
