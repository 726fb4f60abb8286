//! Provider Factory
//!
//! Maps the provider names in configuration to concrete implementations
//! from `mlc-providers`.

use crate::config::{BusConfig, BusProvider, L1Config, L1Provider, L2Config, L2Provider};
use mlc_domain::error::{Error, Result};
use mlc_domain::ports::providers::{DistributedStore, EntryStore, InvalidationBus};
use mlc_providers::cache::{LruEntryStore, MokaEntryStore, NullEntryStore};
use mlc_providers::distributed::{
    MemoryDistributedStore, NullDistributedStore, RedisDistributedStore, RedisStoreOptions,
};
use mlc_providers::events::{NullInvalidationBus, RedisInvalidationBus, TokioInvalidationBus};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Build the L1 entry store
pub fn build_entry_store(config: &L1Config) -> Arc<dyn EntryStore> {
    debug!(provider = ?config.provider, "Building L1 entry store");
    match config.provider {
        L1Provider::Lru => Arc::new(LruEntryStore::with_capacity(config.capacity)),
        L1Provider::Moka => Arc::new(MokaEntryStore::with_max_bytes(config.max_bytes)),
        L1Provider::Null => Arc::new(NullEntryStore::new()),
    }
}

/// Build the L2 distributed store
///
/// Connecting is deferred to the first command, so an unreachable Redis
/// does not fail here.
pub fn build_distributed_store(config: &L2Config) -> Result<Arc<dyn DistributedStore>> {
    debug!(provider = ?config.provider, "Building L2 distributed store");
    match config.provider {
        L2Provider::Redis => {
            let url = redis_url(config)?;
            let options = RedisStoreOptions {
                namespace: config.namespace.clone(),
                operation_timeout: config.operation_timeout(),
                scan_count: config.scan_count,
            };
            Ok(Arc::new(RedisDistributedStore::new(&url, options)?))
        }
        L2Provider::Memory => Ok(Arc::new(MemoryDistributedStore::new())),
        L2Provider::Null => Ok(Arc::new(NullDistributedStore::new())),
    }
}

/// Build the invalidation bus
///
/// The Redis bus shares the connection settings of the L2 section.
pub fn build_invalidation_bus(
    config: &BusConfig,
    l2: &L2Config,
) -> Result<Arc<dyn InvalidationBus>> {
    debug!(provider = ?config.provider, channel = %config.channel, "Building invalidation bus");
    match config.provider {
        BusProvider::Redis => {
            let url = redis_url(l2)?;
            let bus = RedisInvalidationBus::new(&url)?
                .with_channel(config.channel.clone())
                .with_operation_timeout(l2.operation_timeout())
                .with_max_backoff(Duration::from_secs(config.max_backoff_secs));
            Ok(Arc::new(bus))
        }
        BusProvider::Tokio => Ok(Arc::new(
            TokioInvalidationBus::with_capacity(config.capacity).with_channel(config.channel.clone()),
        )),
        BusProvider::Null => Ok(Arc::new(NullInvalidationBus::new())),
    }
}

fn redis_url(config: &L2Config) -> Result<String> {
    config.connection_url().ok_or_else(|| {
        Error::configuration("Redis provider selected but neither cache.l2.url nor cache.l2.host is set")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_store_uses_configured_capacity() {
        let config = L1Config {
            capacity: 3,
            ..Default::default()
        };
        assert_eq!(build_entry_store(&config).provider_name(), "lru");
    }

    #[test]
    fn redis_without_address_is_a_configuration_error() {
        let config = L2Config {
            provider: L2Provider::Redis,
            ..Default::default()
        };
        let err = build_distributed_store(&config).err();
        assert!(matches!(err, Some(Error::Configuration { .. })));
    }

    #[test]
    fn redis_bus_reuses_l2_address() {
        let bus = BusConfig {
            provider: BusProvider::Redis,
            ..Default::default()
        };
        let l2 = L2Config::redis("redis://127.0.0.1:6379");
        let built = build_invalidation_bus(&bus, &l2).unwrap();
        assert_eq!(built.provider_name(), "redis");
    }
}
