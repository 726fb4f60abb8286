//! Composition root
//!
//! Configuration in, running cache out. No global state: the manager built
//! here is passed explicitly to whoever needs it.
//!
//! ```text
//! AppConfig → factory (providers) → CacheManager → CacheRuntime (tasks)
//! ```
//!
//! Tests skip this module and assemble fakes with `CacheManager::builder()`.

pub mod bootstrap;
pub mod factory;

pub use bootstrap::{CacheRuntime, build_cache_manager};
pub use factory::{build_distributed_store, build_entry_store, build_invalidation_bus};
