//! # Multi-Layer Cache - Provider Implementations
//!
//! This crate contains every tier backend and bus transport. Each provider
//! implements a port (trait) defined in `mlc-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | L1 entry store | `EntryStore` | Lru, Moka, Null |
//! | L2 distributed store | `DistributedStore` | Redis, Memory, Null |
//! | Invalidation bus | `InvalidationBus` | Redis pub/sub, Tokio, Null |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! mlc-providers = { version = "0.1", default-features = false, features = ["cache-redis", "events-redis"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use mlc_providers::cache::LruEntryStore;
//! use mlc_providers::distributed::MemoryDistributedStore;
//! use mlc_providers::events::TokioInvalidationBus;
//! ```

pub use mlc_domain::error::{Error, Result};
pub use mlc_domain::ports::providers::{DistributedStore, EntryStore, InvalidationBus};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// L1 entry store implementations
///
/// Implements `EntryStore` for process-local backends.
pub mod cache;

/// L2 distributed store implementations
///
/// Implements `DistributedStore` for shared backends.
pub mod distributed;

/// Invalidation bus implementations
///
/// Implements `InvalidationBus` for pub/sub transports.
pub mod events;
