//! L1 Entry Store Implementations
//!
//! Process-local stores sitting in front of the distributed tier.
//!
//! ## Available Providers
//!
//! | Provider | Bound | Description |
//! |----------|-------|-------------|
//! | [`LruEntryStore`] | entry count | Strict least-recently-used eviction |
//! | [`MokaEntryStore`] | bytes | Size-aware eviction with per-entry expiry |
//! | [`NullEntryStore`] | none | Stores nothing, every read misses |
//!
//! ## Provider Selection Guide
//!
//! - **Default**: `LruEntryStore` bounded by entry count
//! - **Large values**: `MokaEntryStore` when memory, not count, is the limit
//! - **Testing / L2-only**: `NullEntryStore`

#[cfg(feature = "cache-lru")]
pub mod lru;
#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;

#[cfg(feature = "cache-lru")]
pub use lru::LruEntryStore;
#[cfg(feature = "cache-moka")]
pub use moka::MokaEntryStore;
pub use null::NullEntryStore;
