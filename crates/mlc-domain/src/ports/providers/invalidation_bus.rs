//! Invalidation Bus Port
//!
//! Publish/subscribe channel that broadcasts invalidation instructions to
//! every running instance.
//!
//! ## Delivery
//!
//! At-least-once and unordered relative to other invalidations. The
//! publisher receives its own messages like any other subscriber, so
//! handlers must be idempotent.

use crate::error::Result;
use crate::events::InvalidationMessage;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Boxed async stream of invalidation messages
pub type InvalidationStream = Pin<Box<dyn Stream<Item = InvalidationMessage> + Send + 'static>>;

/// Invalidation bus interface
///
/// | Method | Purpose |
/// |--------|---------|
/// | `publish` | Broadcast one message to all subscribers |
/// | `subscribe` | Stream of messages published from now on |
#[async_trait]
pub trait InvalidationBus: Send + Sync + std::fmt::Debug {
    /// Broadcast a message to every subscriber, the publisher included
    async fn publish(&self, message: &InvalidationMessage) -> Result<()>;

    /// Receive messages published after this call returns
    async fn subscribe(&self) -> Result<InvalidationStream>;

    /// Channel name the bus publishes on
    fn channel(&self) -> &str;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
