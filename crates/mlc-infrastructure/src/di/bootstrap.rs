//! Cache bootstrap
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let runtime = CacheRuntime::start(&config).await?;
//!
//! runtime.cache().set("user:42", &profile, SetOptions::default()).await?;
//! runtime.mutations().emit(MutationEvent::new("task.updated").with_param("userId", "42")).await?;
//!
//! runtime.shutdown().await;
//! ```

use crate::cache::events::{MutationSender, mutation_channel};
use crate::cache::manager::CacheManager;
use crate::config::AppConfig;
use crate::di::factory::{build_distributed_store, build_entry_store, build_invalidation_bus};
use mlc_domain::error::Result;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Build a manager from configuration without starting any task
pub fn build_cache_manager(config: &AppConfig) -> Result<CacheManager> {
    let cache = &config.cache;
    let manager = CacheManager::builder()
        .with_l1(build_entry_store(&cache.l1))
        .with_l2(build_distributed_store(&cache.l2)?)
        .with_bus(build_invalidation_bus(&cache.bus, &cache.l2)?)
        .with_patterns(config.patterns.iter().cloned())
        .with_default_ttl(cache.default_ttl())
        .build()?;

    info!(
        instance_id = manager.instance_id(),
        l1 = ?cache.l1.provider,
        l2 = ?cache.l2.provider,
        bus = ?cache.bus.provider,
        patterns = manager.registry().len(),
        "Cache manager built"
    );
    Ok(manager)
}

/// A manager together with its background tasks
///
/// Owns the invalidation listener, the mutation handler and the expiry
/// sweeper.
pub struct CacheRuntime {
    cache: CacheManager,
    mutations: MutationSender,
    listener: Option<JoinHandle<()>>,
    mutation_handler: JoinHandle<()>,
    sweeper: Option<JoinHandle<()>>,
}

impl CacheRuntime {
    /// Build the manager and start its tasks
    ///
    /// A bus that cannot be subscribed to is logged and skipped: the
    /// instance still serves, and TTLs bound how stale it gets.
    pub async fn start(config: &AppConfig) -> Result<Self> {
        let cache = build_cache_manager(config)?;

        let listener = match cache.start_invalidation_listener().await {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Invalidation listener not started, remote invalidations will be missed");
                None
            }
        };

        let (mutations, receiver) = mutation_channel(config.cache.mutation_queue_capacity);
        let mutation_handler = cache.spawn_mutation_handler(receiver);

        let sweeper = config
            .cache
            .l1
            .sweep_interval()
            .map(|interval| cache.spawn_expiry_sweeper(interval));

        Ok(Self {
            cache,
            mutations,
            listener,
            mutation_handler,
            sweeper,
        })
    }

    /// The running manager
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Producer handle for local mutation events
    pub fn mutations(&self) -> &MutationSender {
        &self.mutations
    }

    /// Whether remote invalidations are being applied
    pub fn is_listening(&self) -> bool {
        self.listener.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the background tasks
    ///
    /// Mutation events already queued are handled before this returns.
    /// Clones of the sender held elsewhere keep the handler alive, so it is
    /// only awaited when this runtime held the last one.
    pub async fn shutdown(self) {
        let Self {
            cache,
            mutations,
            listener,
            mutation_handler,
            sweeper,
        } = self;

        let last_sender = mutations.is_last();
        drop(mutations);
        if last_sender {
            if let Err(e) = mutation_handler.await {
                warn!(error = %e, "Mutation handler ended abnormally");
            }
        } else {
            mutation_handler.abort();
        }

        for handle in [listener, sweeper].into_iter().flatten() {
            handle.abort();
        }
        info!(instance_id = cache.instance_id(), "Cache runtime stopped");
    }
}

impl std::fmt::Debug for CacheRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRuntime")
            .field("cache", &self.cache)
            .field("listening", &self.is_listening())
            .field("sweeping", &self.sweeper.is_some())
            .finish_non_exhaustive()
    }
}
