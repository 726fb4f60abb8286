//! L2 Distributed Store Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`RedisDistributedStore`] | Distributed | Redis-backed, shared by every instance |
//! | [`MemoryDistributedStore`] | Local | In-process stand-in with Redis glob semantics |
//! | [`NullDistributedStore`] | Disabled | Stores nothing, never fails |
//!
//! ## Provider Selection Guide
//!
//! - **Multi instance**: `RedisDistributedStore`
//! - **Single process / tests**: `MemoryDistributedStore`, shared through an
//!   `Arc` to simulate several instances against one store
//! - **L1-only deployments**: `NullDistributedStore`

pub mod memory;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use memory::MemoryDistributedStore;
pub use null::NullDistributedStore;
#[cfg(feature = "cache-redis")]
pub use redis::{RedisDistributedStore, RedisStoreOptions};
