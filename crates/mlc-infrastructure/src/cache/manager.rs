//! Cache facade
//!
//! [`CacheManager`] orchestrates the L1 entry store, the L2 distributed
//! store and the invalidation bus behind one get/set/delete/invalidate API.
//!
//! ## Read path
//!
//! ```text
//! get(key) → L1 hit?  → value
//!          → L2 hit?  → promote into L1 → value
//!          → miss     → None
//! ```
//!
//! ## Failure policy
//!
//! L2 and bus failures never reach the caller: reads degrade to misses and
//! writes degrade to L1-only. Values that fail to decode are deleted and
//! read as misses. Only caller mistakes surface as errors: an unserializable
//! value, a malformed pattern, or an unknown pattern name.

use crate::cache::metrics::CacheMetrics;
use crate::cache::registry::PatternRegistry;
use crate::health::{CacheHealth, HealthStatus};
use crate::logging::log_health_check;
use mlc_domain::constants::DEFAULT_CACHE_TTL_SECS;
use mlc_domain::error::{Error, Result};
use mlc_domain::events::{InvalidationMessage, MutationEvent};
use mlc_domain::ports::providers::{DistributedStore, EntryStore, InvalidationBus};
use mlc_domain::value_objects::{
    CacheKey, KeyPattern, MetricsSnapshot, PatternDefinition, ScopeParams, SetOptions, Tier,
};
use mlc_providers::cache::LruEntryStore;
use mlc_providers::distributed::NullDistributedStore;
use mlc_providers::events::NullInvalidationBus;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Two-tier cache with cross-instance invalidation
///
/// Cheap to clone; clones share tiers, registry and metrics.
#[derive(Clone)]
pub struct CacheManager {
    l1: Arc<dyn EntryStore>,
    l2: Arc<dyn DistributedStore>,
    bus: Arc<dyn InvalidationBus>,
    registry: Arc<PatternRegistry>,
    metrics: Arc<CacheMetrics>,
    default_ttl: Duration,
    instance_id: Arc<str>,
}

impl CacheManager {
    /// Start building a manager
    pub fn builder() -> CacheManagerBuilder {
        CacheManagerBuilder::new()
    }

    /// Id tagged on invalidations published by this instance
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Pattern registry
    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    /// TTL applied when `set` is given none
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub(crate) fn l1(&self) -> &Arc<dyn EntryStore> {
        &self.l1
    }

    pub(crate) fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub(crate) fn bus(&self) -> &Arc<dyn InvalidationBus> {
        &self.bus
    }

    /// TTL for `key`: the matching pattern's, else the default
    pub fn ttl_for(&self, key: &str) -> Duration {
        self.registry
            .match_key(key)
            .map_or(self.default_ttl, |definition| definition.ttl())
    }

    /// Concrete key of a registered pattern
    pub fn key_for(&self, pattern_name: &str, params: &ScopeParams) -> Result<CacheKey> {
        self.registry.resolve(pattern_name, params)
    }

    /// Read a value, consulting L1 then L2
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(value) = self.l1.get(key).await {
            match serde_json::from_value::<T>(value) {
                Ok(decoded) => {
                    self.metrics.record_hit(Tier::L1);
                    return Some(decoded);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Dropping undecodable L1 entry");
                    self.l1.delete(key).await;
                    self.metrics.record_corrupt_entry();
                }
            }
        }

        let json = match self.l2.get_json(key).await {
            Ok(Some(json)) => json,
            Ok(None) => {
                self.metrics.record_miss();
                return None;
            }
            Err(e @ Error::Corrupt { .. }) => {
                self.drop_corrupt_l2(key, &e).await;
                return None;
            }
            Err(e) => {
                debug!(key = %key, error = %e, "L2 read failed, treating as miss");
                self.metrics.record_miss();
                return None;
            }
        };

        let decoded = serde_json::from_str::<serde_json::Value>(&json).and_then(|value| {
            serde_json::from_value::<T>(value.clone()).map(|decoded| (value, decoded))
        });
        match decoded {
            Ok((value, decoded)) => {
                self.l1.set(key, value, self.ttl_for(key)).await;
                self.metrics.record_promotion();
                self.metrics.record_hit(Tier::L2);
                Some(decoded)
            }
            Err(e) => {
                self.drop_corrupt_l2(key, &e).await;
                None
            }
        }
    }

    async fn drop_corrupt_l2(&self, key: &str, error: &impl std::fmt::Display) {
        warn!(key = %key, error = %error, "Deleting corrupt L2 entry");
        if let Err(delete_err) = self.l2.delete(key).await {
            debug!(key = %key, error = %delete_err, "Could not delete corrupt L2 entry");
        }
        self.metrics.record_corrupt_entry();
        self.metrics.record_miss();
    }

    /// Read a value as raw JSON
    pub async fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        self.get::<serde_json::Value>(key).await
    }

    /// Store a value in the tiers selected by `options`
    ///
    /// TTL precedence: `options.ttl`, then the matching pattern's TTL, then
    /// the default. A zero TTL removes the key instead. L2 failures are
    /// logged and counted; only serialization errors are returned.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let ttl = options.ttl.unwrap_or_else(|| self.ttl_for(key));

        if options.tiers.includes(Tier::L2) {
            let json = serde_json::to_string(&value)?;
            if let Err(e) = self.l2.set_json(key, &json, ttl).await {
                warn!(key = %key, error = %e, "L2 write failed, value cached in L1 only");
                self.metrics.record_partial_write_failure();
            }
        }
        if options.tiers.includes(Tier::L1) {
            self.l1.set(key, value, ttl).await;
        }
        Ok(())
    }

    /// Remove `key` from both tiers
    ///
    /// Returns whether either tier held it.
    pub async fn delete(&self, key: &str) -> bool {
        let in_l1 = self.l1.delete(key).await;
        let in_l2 = match self.l2.delete(key).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(key = %key, error = %e, "L2 delete failed");
                self.metrics.record_partial_write_failure();
                false
            }
        };
        in_l1 || in_l2
    }

    /// Remove every key matching `pattern` and tell the other instances
    ///
    /// Returns the number of distinct keys removed locally. Fails only when
    /// `pattern` is malformed; bus failures are logged.
    pub async fn invalidate(&self, pattern: &str, reason: &str) -> Result<usize> {
        let compiled = KeyPattern::parse(pattern)?;
        let removed = self.remove_matching(&compiled).await;
        self.metrics.record_invalidation(reason, removed);

        let message =
            InvalidationMessage::new(pattern, reason).with_origin(self.instance_id.as_ref());
        if let Err(e) = self.bus.publish(&message).await {
            warn!(pattern = %pattern, error = %e, "Invalidation publish failed, other instances rely on TTL");
        }

        info!(pattern = %pattern, reason = %reason, removed, "Invalidated cache keys");
        Ok(removed)
    }

    /// Apply an invalidation received from the bus
    ///
    /// Same local removal as [`Self::invalidate`], without publishing.
    pub async fn apply_invalidation(&self, message: &InvalidationMessage) -> Result<usize> {
        let compiled = KeyPattern::parse(&message.pattern)?;
        let removed = self.remove_matching(&compiled).await;
        self.metrics.record_invalidation(&message.reason, removed);
        debug!(
            pattern = %message.pattern,
            reason = %message.reason,
            origin = message.origin.as_deref().unwrap_or("unknown"),
            removed,
            "Applied invalidation"
        );
        Ok(removed)
    }

    /// Invalidate every pattern listening to `event`
    ///
    /// Placeholders are filled from the event scope; missing ones widen to
    /// `*`. The event name is the recorded reason.
    pub async fn invalidate_for_event(&self, event: &MutationEvent) -> Result<usize> {
        let targets = self.registry.invalidation_targets(event)?;
        if targets.is_empty() {
            debug!(event = %event.event_name, "No cache pattern listens to event");
            return Ok(0);
        }

        let mut removed = 0;
        for target in targets {
            debug!(event = %event.event_name, pattern_name = %target.pattern_name, pattern = %target.pattern, "Event invalidates pattern");
            removed += self.invalidate(&target.pattern, &event.event_name).await?;
        }
        Ok(removed)
    }

    /// Register a pattern at runtime
    pub fn register_pattern(&self, definition: PatternDefinition) -> Result<()> {
        self.registry.register(definition)
    }

    /// Metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Check both tiers
    pub async fn health(&self) -> CacheHealth {
        let l2 = self.l2.ping().await;
        let l2_available = l2.is_ok();
        let l2_error = l2.err().map(|e| e.to_string());
        log_health_check(self.l2.provider_name(), l2_available, l2_error.as_deref());

        CacheHealth {
            status: if l2_available {
                HealthStatus::Up
            } else {
                HealthStatus::Degraded
            },
            instance_id: self.instance_id.to_string(),
            l1_entries: self.l1.entry_count().await,
            l1_provider: self.l1.provider_name().to_string(),
            l2_provider: self.l2.provider_name().to_string(),
            l2_available,
            l2_error,
            bus_provider: self.bus.provider_name().to_string(),
            bus_channel: self.bus.channel().to_string(),
            patterns: self.registry.len(),
        }
    }

    async fn remove_matching(&self, pattern: &KeyPattern) -> usize {
        let mut removed: BTreeSet<String> = BTreeSet::new();

        if let Some(key) = pattern.literal_key() {
            if self.l1.delete(&key).await {
                removed.insert(key.clone());
            }
            match self.l2.delete(&key).await {
                Ok(true) => {
                    removed.insert(key);
                }
                Ok(false) => {}
                Err(e) => warn!(key = %key, error = %e, "L2 delete failed during invalidation"),
            }
            return removed.len();
        }

        let matches = |key: &str| pattern.matches(key);
        removed.extend(self.l1.delete_matching(&matches).await);

        match self.l2.keys_matching(&pattern.to_scan_glob()).await {
            Ok(candidates) => {
                // SCAN globs let `*` cross delimiters; keep only precise matches
                let doomed: Vec<String> = candidates.into_iter().filter(|key| matches(key)).collect();
                if !doomed.is_empty() {
                    match self.l2.delete_many(&doomed).await {
                        Ok(_) => removed.extend(doomed),
                        Err(e) => {
                            warn!(pattern = %pattern, error = %e, "L2 bulk delete failed during invalidation");
                        }
                    }
                }
            }
            Err(e) => warn!(pattern = %pattern, error = %e, "L2 scan failed during invalidation"),
        }

        removed.len()
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("instance_id", &self.instance_id)
            .field("l1", &self.l1.provider_name())
            .field("l2", &self.l2.provider_name())
            .field("bus", &self.bus.provider_name())
            .field("patterns", &self.registry.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Builder for [`CacheManager`]
///
/// Unset tiers default to an LRU L1, no L2 and no bus.
pub struct CacheManagerBuilder {
    l1: Option<Arc<dyn EntryStore>>,
    l2: Option<Arc<dyn DistributedStore>>,
    bus: Option<Arc<dyn InvalidationBus>>,
    registry: Option<Arc<PatternRegistry>>,
    patterns: Vec<PatternDefinition>,
    default_ttl: Duration,
    instance_id: Option<String>,
}

impl Default for CacheManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheManagerBuilder {
    /// Create a builder with defaults
    pub fn new() -> Self {
        Self {
            l1: None,
            l2: None,
            bus: None,
            registry: None,
            patterns: Vec::new(),
            default_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            instance_id: None,
        }
    }

    /// L1 entry store
    pub fn with_l1(mut self, store: Arc<dyn EntryStore>) -> Self {
        self.l1 = Some(store);
        self
    }

    /// L2 distributed store
    pub fn with_l2(mut self, store: Arc<dyn DistributedStore>) -> Self {
        self.l2 = Some(store);
        self
    }

    /// Invalidation bus
    pub fn with_bus(mut self, bus: Arc<dyn InvalidationBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Share an existing registry
    pub fn with_registry(mut self, registry: Arc<PatternRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register a pattern on build
    pub fn with_pattern(mut self, definition: PatternDefinition) -> Self {
        self.patterns.push(definition);
        self
    }

    /// Register several patterns on build
    pub fn with_patterns<I: IntoIterator<Item = PatternDefinition>>(mut self, definitions: I) -> Self {
        self.patterns.extend(definitions);
        self
    }

    /// TTL used when neither caller nor pattern gives one
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Override the generated instance id
    pub fn with_instance_id<S: Into<String>>(mut self, instance_id: S) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// Build the manager, registering pending patterns
    pub fn build(self) -> Result<CacheManager> {
        let registry = self.registry.unwrap_or_default();
        for definition in self.patterns {
            registry.register(definition)?;
        }

        let instance_id = self
            .instance_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(CacheManager {
            l1: self.l1.unwrap_or_else(|| Arc::new(LruEntryStore::new())),
            l2: self.l2.unwrap_or_else(|| Arc::new(NullDistributedStore::new())),
            bus: self.bus.unwrap_or_else(|| Arc::new(NullInvalidationBus::new())),
            registry,
            metrics: Arc::new(CacheMetrics::new()),
            default_ttl: self.default_ttl,
            instance_id: Arc::from(instance_id),
        })
    }
}
