//! Null invalidation bus
//!
//! Accepts every publish and never delivers anything. Subscribers get a
//! stream that ends immediately.

use async_trait::async_trait;
use futures::stream;
use mlc_domain::constants::DEFAULT_INVALIDATION_CHANNEL;
use mlc_domain::error::Result;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::{InvalidationBus, InvalidationStream};

/// No-op invalidation bus
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInvalidationBus;

impl NullInvalidationBus {
    /// Create a new null bus
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InvalidationBus for NullInvalidationBus {
    async fn publish(&self, _message: &InvalidationMessage) -> Result<()> {
        Ok(())
    }

    async fn subscribe(&self) -> Result<InvalidationStream> {
        Ok(Box::pin(stream::empty()))
    }

    fn channel(&self) -> &str {
        DEFAULT_INVALIDATION_CHANNEL
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
