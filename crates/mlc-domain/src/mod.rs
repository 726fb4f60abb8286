//! # Multi-Layer Cache - Domain
//!
//! Core types and ports of the two-tier cache.
//!
//! ## Architecture
//!
//! ```text
//! get ─► L1 EntryStore ─► L2 DistributedStore ─► caller computes + set
//!             ▲                    │
//!             └──── promote ───────┘
//!
//! mutation ─► InvalidationBus ─► every instance drops matching L1 + L2 keys
//! ```
//!
//! - [`error`] - domain error taxonomy
//! - [`value_objects`] - keys, entries, key patterns, write options, metrics
//! - [`events`] - mutation events and invalidation messages
//! - [`ports`] - `EntryStore`, `DistributedStore`, `InvalidationBus`

pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use events::{InvalidationMessage, MutationEvent};
pub use value_objects::{
    CacheEntry, CacheKey, KeyPattern, MetricsSnapshot, PatternDefinition, ScopeParams, SetOptions,
    Tier, TierSet,
};
