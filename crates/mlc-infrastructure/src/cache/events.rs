//! Local mutation events
//!
//! Bounded channel between whatever mutates authoritative data and the
//! cache. Producers hold a [`MutationSender`]; the cache drains the
//! [`MutationReceiver`] in [`CacheManager::spawn_mutation_handler`] and
//! invalidates every pattern listening to each event.

use crate::cache::manager::CacheManager;
use mlc_domain::error::{Error, Result};
use mlc_domain::events::MutationEvent;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Producer side of the mutation channel
#[derive(Debug, Clone)]
pub struct MutationSender {
    sender: mpsc::Sender<MutationEvent>,
}

/// Consumer side of the mutation channel
#[derive(Debug)]
pub struct MutationReceiver {
    receiver: mpsc::Receiver<MutationEvent>,
}

/// Create a mutation channel holding at most `capacity` pending events
pub fn mutation_channel(capacity: usize) -> (MutationSender, MutationReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (MutationSender { sender }, MutationReceiver { receiver })
}

impl MutationSender {
    /// Queue an event, waiting while the channel is full
    pub async fn emit(&self, event: MutationEvent) -> Result<()> {
        self.sender
            .send(event)
            .await
            .map_err(|_| Error::infrastructure("Mutation handler has stopped"))
    }

    /// Queue an event without waiting
    pub fn try_emit(&self, event: MutationEvent) -> Result<()> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(event) => Error::infrastructure(format!(
                "Mutation queue is full, dropped '{}'",
                event.event_name
            )),
            TrySendError::Closed(_) => Error::infrastructure("Mutation handler has stopped"),
        })
    }

    /// Whether this is the only remaining sender
    pub fn is_last(&self) -> bool {
        self.sender.strong_count() == 1
    }
}

impl MutationReceiver {
    /// Next event, `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<MutationEvent> {
        self.receiver.recv().await
    }
}

impl CacheManager {
    /// Spawn the task turning mutation events into invalidations
    ///
    /// Events are handled one at a time in arrival order. The task ends
    /// when every [`MutationSender`] is dropped.
    pub fn spawn_mutation_handler(&self, mut receiver: MutationReceiver) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                if let Err(e) = manager.invalidate_for_event(&event).await {
                    warn!(event = %event.event_name, error = %e, "Mutation event invalidation failed");
                }
            }
            info!("Mutation handler stopped");
        })
    }
}
