//! Cache-aware wrapping
//!
//! Turns any computation into one that goes through the cache:
//!
//! ```ignore
//! let load_profile = cache
//!     .wrap(|id: &u64| format!("user:{id}"), Some(Duration::from_secs(3600)))
//!     .around(|id: u64| async move { repository.load_profile(id).await });
//!
//! let profile = load_profile.call(42).await?; // computes and caches
//! let again = load_profile.call(42).await?;   // served from cache
//! ```
//!
//! Errors from the computation are returned unchanged and nothing is
//! cached for them. Cache failures never fail the call.

use crate::cache::manager::CacheManager;
use crate::constants::WRAP_KEY_SEPARATOR;
use mlc_domain::error::Result;
use mlc_domain::value_objects::SetOptions;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::future::{Future, Ready, ready};
use std::time::Duration;
use tracing::{debug, warn};

/// Default key: `namespace:` followed by the SHA-256 of the arguments' JSON
///
/// Struct fields serialize in declaration order and maps should be
/// `BTreeMap`s so equal arguments always produce the same key.
pub fn default_key<A: Serialize + ?Sized>(namespace: &str, args: &A) -> Result<String> {
    let encoded = serde_json::to_vec(args)?;
    let digest = Sha256::digest(&encoded);
    Ok(format!(
        "{namespace}{WRAP_KEY_SEPARATOR}{}",
        hex::encode(digest)
    ))
}

/// Derives a cache key from call arguments
///
/// `None` bypasses the cache for that call. Implemented for every
/// `Fn(&A) -> String`.
pub trait KeyFn<A>: Send + Sync {
    /// Key for `args`
    fn key(&self, args: &A) -> Option<String>;
}

impl<A, F> KeyFn<A> for F
where
    F: Fn(&A) -> String + Send + Sync,
{
    fn key(&self, args: &A) -> Option<String> {
        Some(self(args))
    }
}

/// Key function built on [`default_key`]
#[derive(Debug, Clone)]
pub struct DefaultKey {
    namespace: String,
}

impl DefaultKey {
    /// Keys prefixed with `namespace`
    pub fn new<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl<A: Serialize> KeyFn<A> for DefaultKey {
    fn key(&self, args: &A) -> Option<String> {
        match default_key(&self.namespace, args) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(namespace = %self.namespace, error = %e, "Arguments are not serializable, bypassing cache");
                None
            }
        }
    }
}

/// Key function and TTL waiting for the computation to wrap
pub struct CacheWrap<K> {
    cache: CacheManager,
    key_fn: K,
    ttl: Option<Duration>,
}

impl CacheManager {
    /// Start wrapping a computation
    ///
    /// With `ttl` unset, the usual precedence applies (matching pattern,
    /// then default).
    pub fn wrap<K>(&self, key_fn: K, ttl: Option<Duration>) -> CacheWrap<K> {
        CacheWrap {
            cache: self.clone(),
            key_fn,
            ttl,
        }
    }

    /// Start wrapping with keys from [`default_key`]
    pub fn wrap_default<S: Into<String>>(
        &self,
        namespace: S,
        ttl: Option<Duration>,
    ) -> CacheWrap<DefaultKey> {
        self.wrap(DefaultKey::new(namespace), ttl)
    }
}

impl<K> CacheWrap<K> {
    /// Wrap an async computation
    pub fn around<F>(self, f: F) -> CachedFn<K, F> {
        CachedFn {
            cache: self.cache,
            key_fn: self.key_fn,
            ttl: self.ttl,
            f,
        }
    }

    /// Wrap a synchronous computation behind the same async interface
    pub fn around_sync<A, T, E, G>(
        self,
        g: G,
    ) -> CachedFn<K, impl Fn(A) -> Ready<std::result::Result<T, E>>>
    where
        G: Fn(A) -> std::result::Result<T, E>,
    {
        self.around(move |args: A| ready(g(args)))
    }
}

/// A computation whose results go through the cache
pub struct CachedFn<K, F> {
    cache: CacheManager,
    key_fn: K,
    ttl: Option<Duration>,
    f: F,
}

impl<K, F> CachedFn<K, F> {
    /// Return the cached result for `args`, computing and storing it on a miss
    pub async fn call<A, Fut, T, E>(&self, args: A) -> std::result::Result<T, E>
    where
        K: KeyFn<A>,
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        T: Serialize + DeserializeOwned,
    {
        let Some(key) = self.key_fn.key(&args) else {
            return (self.f)(args).await;
        };

        if let Some(cached) = self.cache.get::<T>(&key).await {
            debug!(key = %key, "Wrapped call served from cache");
            return Ok(cached);
        }

        let value = (self.f)(args).await?;
        let options = self.ttl.map_or_else(SetOptions::default, SetOptions::ttl);
        if let Err(e) = self.cache.set(&key, &value, options).await {
            warn!(key = %key, error = %e, "Could not cache wrapped result");
        }
        Ok(value)
    }

    /// The cache this function reads and writes
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }
}
