//! Invalidation Bus Implementations
//!
//! ## Available Providers
//!
//! | Provider | Scope | Description |
//! |----------|-------|-------------|
//! | [`RedisInvalidationBus`] | Cluster | Redis pub/sub with automatic resubscribe |
//! | [`TokioInvalidationBus`] | Process | Tokio broadcast channel |
//! | [`NullInvalidationBus`] | None | Drops every message |

pub mod null;
#[cfg(feature = "events-redis")]
pub mod redis;
pub mod tokio;

pub use null::NullInvalidationBus;
#[cfg(feature = "events-redis")]
pub use redis::RedisInvalidationBus;
pub use tokio::TokioInvalidationBus;
