//! Value objects
//!
//! Immutable types shared by the ports and their implementations.

pub mod entry;
pub mod key;
pub mod metrics;
pub mod options;
pub mod pattern;

pub use entry::{CacheEntry, Tier};
pub use key::CacheKey;
pub use metrics::{MetricsSnapshot, TierHits};
pub use options::{SetOptions, TierSet};
pub use pattern::{KeyPattern, MissingParams, PatternDefinition, ScopeParams};
