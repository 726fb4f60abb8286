//! Redis Pub/Sub Invalidation Bus
//!
//! Publishes invalidation messages as JSON on a Redis channel and relays
//! the channel to subscribers.
//!
//! ## How It Works
//!
//! ```text
//! Instance 1: publish {"pattern":"tasks:42:*","reason":"task.updated"}
//!   ↓
//! Redis: PUBLISH cache:invalidate <json>
//!   ↓
//! Instance 1..N: relay task decodes the payload → subscriber stream
//! ```
//!
//! `subscribe` opens the pub/sub connection and confirms the `SUBSCRIBE`
//! before it returns, then hands the connection to a relay task. When the
//! connection drops, the task resubscribes with exponential backoff. The
//! task stops as soon as the subscriber stream is dropped, even while the
//! channel is idle.
//!
//! Messages published while the relay is reconnecting are not replayed;
//! entry TTLs bound the resulting staleness.

use crate::constants::{PUBSUB_FORWARD_BUFFER, PUBSUB_INITIAL_BACKOFF_SECS, PUBSUB_MAX_BACKOFF_SECS};
use crate::utils::redis::{open_client, with_timeout};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use mlc_domain::constants::{DEFAULT_INVALIDATION_CHANNEL, DEFAULT_OPERATION_TIMEOUT_MS};
use mlc_domain::error::Result;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::{InvalidationBus, InvalidationStream};
use redis::aio::{ConnectionManager, PubSub};
use redis::{AsyncCommands, Client};
use std::pin::pin;
use std::time::Duration;
use tokio::sync::{OnceCell, mpsc};
use tracing::{debug, error, info, warn};

/// Invalidation bus over Redis pub/sub
pub struct RedisInvalidationBus {
    client: Client,
    publisher: OnceCell<ConnectionManager>,
    channel: String,
    operation_timeout: Duration,
    max_backoff: Duration,
}

/// Why a relay pass ended
enum RelayEnd {
    SubscriberGone,
    ConnectionClosed,
}

impl RedisInvalidationBus {
    /// Create a bus on the default channel
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            client: open_client(url)?,
            publisher: OnceCell::new(),
            channel: DEFAULT_INVALIDATION_CHANNEL.to_string(),
            operation_timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
            max_backoff: Duration::from_secs(PUBSUB_MAX_BACKOFF_SECS),
        })
    }

    /// Use another channel name
    pub fn with_channel<S: Into<String>>(mut self, channel: S) -> Self {
        self.channel = channel.into();
        self
    }

    /// Deadline for publishing and for establishing a subscription
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Cap on the resubscribe backoff
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    async fn publisher(&self) -> Result<ConnectionManager> {
        let manager = self
            .publisher
            .get_or_try_init(|| async {
                with_timeout(
                    "CONNECT",
                    self.operation_timeout,
                    ConnectionManager::new(self.client.clone()),
                )
                .await
            })
            .await?;
        Ok(manager.clone())
    }
}

async fn open_subscription(client: &Client, channel: &str, limit: Duration) -> Result<PubSub> {
    let mut pubsub = with_timeout("SUBSCRIBE", limit, client.get_async_pubsub()).await?;
    with_timeout("SUBSCRIBE", limit, pubsub.subscribe(channel)).await?;
    info!(channel = %channel, "Subscribed to invalidation channel");
    Ok(pubsub)
}

async fn relay<S>(mut payloads: S, tx: &mpsc::Sender<InvalidationMessage>) -> RelayEnd
where
    S: Stream<Item = redis::RedisResult<String>> + Unpin,
{
    loop {
        let payload = tokio::select! {
            () = tx.closed() => return RelayEnd::SubscriberGone,
            next = payloads.next() => match next {
                Some(payload) => payload,
                None => return RelayEnd::ConnectionClosed,
            },
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to read invalidation payload");
                continue;
            }
        };
        match InvalidationMessage::from_json(&payload) {
            Ok(message) => {
                debug!(pattern = %message.pattern, "Received invalidation");
                if tx.send(message).await.is_err() {
                    return RelayEnd::SubscriberGone;
                }
            }
            Err(e) => warn!(error = %e, "Discarding malformed invalidation message"),
        }
    }
}

#[async_trait]
impl InvalidationBus for RedisInvalidationBus {
    async fn publish(&self, message: &InvalidationMessage) -> Result<()> {
        let payload = message.to_json()?;
        let mut conn = self.publisher().await?;
        with_timeout(
            "PUBLISH",
            self.operation_timeout,
            conn.publish::<_, _, ()>(&self.channel, payload),
        )
        .await?;
        debug!(pattern = %message.pattern, channel = %self.channel, "Published invalidation");
        Ok(())
    }

    async fn subscribe(&self) -> Result<InvalidationStream> {
        let first = open_subscription(&self.client, &self.channel, self.operation_timeout).await?;
        let (tx, rx) = mpsc::channel(PUBSUB_FORWARD_BUFFER);

        let client = self.client.clone();
        let channel = self.channel.clone();
        let limit = self.operation_timeout;
        let max_backoff = self.max_backoff;

        tokio::spawn(async move {
            let initial_backoff = Duration::from_secs(PUBSUB_INITIAL_BACKOFF_SECS);
            let mut backoff = initial_backoff;
            let mut pending = Some(first);

            loop {
                let mut pubsub = match pending.take() {
                    Some(pubsub) => pubsub,
                    None => match open_subscription(&client, &channel, limit).await {
                        Ok(pubsub) => {
                            backoff = initial_backoff;
                            pubsub
                        }
                        Err(e) => {
                            error!(
                                error = %e,
                                backoff_secs = backoff.as_secs(),
                                "Invalidation subscription failed, retrying"
                            );
                            tokio::select! {
                                () = tokio::time::sleep(backoff) => {}
                                () = tx.closed() => return,
                            }
                            backoff = (backoff * 2).min(max_backoff);
                            continue;
                        }
                    },
                };

                let payloads = pin!(pubsub.on_message().map(|msg| msg.get_payload::<String>()));
                match relay(payloads, &tx).await {
                    RelayEnd::SubscriberGone => {
                        debug!(channel = %channel, "Invalidation subscriber dropped, stopping relay");
                        return;
                    }
                    RelayEnd::ConnectionClosed => {
                        warn!(channel = %channel, "Invalidation pub/sub connection closed, resubscribing");
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|message| (message, rx))
        });
        Ok(Box::pin(stream))
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisInvalidationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisInvalidationBus")
            .field("channel", &self.channel)
            .field("operation_timeout", &self.operation_timeout)
            .field("max_backoff", &self.max_backoff)
            .finish_non_exhaustive()
    }
}
