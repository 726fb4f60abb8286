//! Distributed Store Port (L2)
//!
//! Shared key-value store reachable over the network, used for
//! cross-instance sharing and larger capacity.
//!
//! ## Contract
//!
//! - Values travel as JSON text; decoding is the caller's job.
//! - Every call fails fast with [`Error::Unavailable`] when the store cannot
//!   be reached or does not answer in time. Nothing hangs.
//! - `keys_matching` takes a Redis-style glob and should scan incrementally.
//!
//! [`Error::Unavailable`]: crate::error::Error::Unavailable

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Distributed Store Port
///
/// # Implementations
///
/// - **Redis**: Redis-compatible server over a reconnecting connection
/// - **Memory**: in-process stand-in shared between facades in tests
/// - **Null**: L2 disabled; reads miss, writes are dropped
///
/// # Example
///
/// ```ignore
/// store.set_json("user:42", r#"{"name":"Ada"}"#, Duration::from_secs(60)).await?;
/// let json = store.get_json("user:42").await?;
/// ```
#[async_trait]
pub trait DistributedStore: Send + Sync + std::fmt::Debug {
    /// Get a value as JSON text
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Store JSON text with an expiry
    async fn set_json(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete a key
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Delete several keys in one round trip
    ///
    /// # Returns
    /// Number of keys that existed
    async fn delete_many(&self, keys: &[String]) -> Result<usize>;

    /// Discover keys matching a Redis-style glob
    async fn keys_matching(&self, glob: &str) -> Result<Vec<String>>;

    /// Check the store answers
    async fn ping(&self) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
