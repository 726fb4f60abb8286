//! Invalidation listener
//!
//! Background task applying bus messages to the local tiers. Every
//! instance runs one, the publisher included, so removal is idempotent.

use crate::cache::manager::CacheManager;
use futures::StreamExt;
use mlc_domain::error::Result;
use tokio::task::JoinHandle;
use tracing::{info, warn};

impl CacheManager {
    /// Subscribe to the bus and spawn the listener task
    ///
    /// The subscription is established before this returns, so no message
    /// published afterwards is missed. The task ends when the bus stream
    /// ends.
    pub async fn start_invalidation_listener(&self) -> Result<JoinHandle<()>> {
        let mut messages = self.bus().subscribe().await?;
        let manager = self.clone();
        let channel = self.bus().channel().to_string();
        info!(channel = %channel, provider = self.bus().provider_name(), "Invalidation listener started");

        Ok(tokio::spawn(async move {
            while let Some(message) = messages.next().await {
                if let Err(e) = manager.apply_invalidation(&message).await {
                    warn!(pattern = %message.pattern, error = %e, "Ignoring invalid invalidation message");
                }
            }
            info!(channel = %channel, "Invalidation listener stopped");
        }))
    }
}
