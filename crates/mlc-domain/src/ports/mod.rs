//! Ports
//!
//! Trait seams between the cache facade and its tiers.

pub mod providers;

pub use providers::{DistributedStore, EntryStore, InvalidationBus, InvalidationStream, KeyMatcher};
