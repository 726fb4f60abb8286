//! Tokio Broadcast Invalidation Bus
//!
//! In-process bus using a tokio broadcast channel. Every cache manager
//! holding a clone of the same bus sees every message, which is how
//! single-process deployments and tests model a cluster.
//!
//! ## Example
//!
//! ```ignore
//! use mlc_providers::events::TokioInvalidationBus;
//!
//! let bus = TokioInvalidationBus::new();
//! let stream = bus.subscribe().await?;
//! bus.publish(&InvalidationMessage::new("tasks:*", "manual")).await?;
//! ```

use crate::constants::TOKIO_BUS_DEFAULT_CAPACITY;
use async_trait::async_trait;
use futures::stream;
use mlc_domain::constants::DEFAULT_INVALIDATION_CHANNEL;
use mlc_domain::error::Result;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::{InvalidationBus, InvalidationStream};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Invalidation bus over a tokio broadcast channel
///
/// When a subscriber falls more than `capacity` messages behind, the oldest
/// messages are dropped for it and a warning is logged.
#[derive(Clone)]
pub struct TokioInvalidationBus {
    sender: Arc<broadcast::Sender<InvalidationMessage>>,
    capacity: usize,
    channel: String,
}

impl TokioInvalidationBus {
    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(TOKIO_BUS_DEFAULT_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` messages per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
            capacity: capacity.max(1),
            channel: DEFAULT_INVALIDATION_CHANNEL.to_string(),
        }
    }

    /// Rename the logical channel reported by [`InvalidationBus::channel`]
    pub fn with_channel<S: Into<String>>(mut self, channel: S) -> Self {
        self.channel = channel.into();
        self
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TokioInvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokioInvalidationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioInvalidationBus")
            .field("channel", &self.channel)
            .field("capacity", &self.capacity)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[async_trait]
impl InvalidationBus for TokioInvalidationBus {
    async fn publish(&self, message: &InvalidationMessage) -> Result<()> {
        match self.sender.send(message.clone()) {
            Ok(count) => debug!(pattern = %message.pattern, subscribers = count, "Published invalidation"),
            Err(_) => debug!(pattern = %message.pattern, "Published invalidation but no subscribers"),
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<InvalidationStream> {
        let receiver = self.sender.subscribe();

        let stream = stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(message) => return Some((message, rx)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Invalidation stream lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn provider_name(&self) -> &str {
        "tokio"
    }
}
