//! Cache facade and its background machinery
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`manager`] | `CacheManager` facade and its builder |
//! | [`registry`] | Named key templates, TTLs and event subscriptions |
//! | [`metrics`] | Hit/miss/invalidation counters |
//! | [`listener`] | Applies invalidations published by other instances |
//! | [`events`] | Bounded channel for local mutation events |
//! | [`sweeper`] | Periodic removal of expired L1 entries |
//! | [`warming`] | Pre-populating warmable patterns |
//! | [`wrap`] | Cache-aware function wrapping |

pub mod events;
pub mod listener;
pub mod manager;
pub mod metrics;
pub mod registry;
pub mod sweeper;
pub mod warming;
pub mod wrap;

pub use events::{MutationReceiver, MutationSender, mutation_channel};
pub use manager::{CacheManager, CacheManagerBuilder};
pub use metrics::CacheMetrics;
pub use registry::{InvalidationTarget, PatternRegistry};
pub use warming::{WarmingFailure, WarmingReport, WarmingStrategy};
pub use wrap::{CacheWrap, CachedFn, DefaultKey, KeyFn, default_key};
