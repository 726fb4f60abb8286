//! # Multi-Layer Cache
//!
//! An in-process LRU (L1) in front of a shared Redis store (L2), with
//! named key patterns and invalidation broadcast to every instance.
//!
//! ## Example
//!
//! ```ignore
//! use mlc::infrastructure::config::ConfigLoader;
//! use mlc::infrastructure::di::CacheRuntime;
//! use mlc::{MutationEvent, SetOptions};
//!
//! let config = ConfigLoader::new().load()?;
//! let runtime = CacheRuntime::start(&config).await?;
//! let cache = runtime.cache();
//!
//! cache.set("tasks:42:page:1", &page, SetOptions::default()).await?;
//! let cached: Option<Vec<Task>> = cache.get("tasks:42:page:1").await;
//!
//! // Every instance drops tasks:42:*
//! cache.invalidate_for_event(&MutationEvent::new("task.update").with_param("userId", "42")).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, events, errors and the provider ports
//! - `providers` - LRU/Moka L1 stores, Redis/memory L2 stores, buses
//! - `infrastructure` - `CacheManager`, configuration, logging, bootstrap
//! - `cli` - the `mlc` command line

pub mod cli;

/// Domain layer - value objects, events and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mlc_domain::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use mlc_providers::*;
}

/// Infrastructure layer - cache facade, config and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use mlc_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use infrastructure::cache::{CacheManager, WarmingStrategy, mutation_channel};
pub use infrastructure::di::CacheRuntime;
