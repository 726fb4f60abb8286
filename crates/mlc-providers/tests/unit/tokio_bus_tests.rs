//! Tokio Invalidation Bus Tests

use futures::StreamExt;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::InvalidationBus;
use mlc_providers::events::TokioInvalidationBus;
use std::time::Duration;

#[tokio::test]
async fn test_tokio_bus_fans_out_to_every_subscriber() {
    let bus = TokioInvalidationBus::new();
    let mut first = bus.subscribe().await.unwrap();
    let mut second = bus.clone().subscribe().await.unwrap();
    assert_eq!(bus.subscriber_count(), 2);

    let message = InvalidationMessage::new("tasks:42:*", "task.updated").with_origin("node-a");
    bus.publish(&message).await.unwrap();

    let timeout = Duration::from_secs(1);
    let got_first = tokio::time::timeout(timeout, first.next()).await.unwrap();
    let got_second = tokio::time::timeout(timeout, second.next()).await.unwrap();
    assert_eq!(got_first, Some(message.clone()));
    assert_eq!(got_second, Some(message));
}

#[tokio::test]
async fn test_tokio_bus_publish_without_subscribers() {
    let bus = TokioInvalidationBus::new();
    bus.publish(&InvalidationMessage::new("*", "manual"))
        .await
        .unwrap();
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test]
async fn test_tokio_bus_lag_skips_to_newest() {
    let bus = TokioInvalidationBus::with_capacity(2);
    let mut stream = bus.subscribe().await.unwrap();

    for i in 0..5 {
        bus.publish(&InvalidationMessage::new(format!("k:{i}"), "manual"))
            .await
            .unwrap();
    }

    let next = tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.pattern, "k:3");
}

#[test]
fn test_tokio_bus_channel_name() {
    let bus = TokioInvalidationBus::new().with_channel("custom");
    assert_eq!(bus.channel(), "custom");
    assert_eq!(bus.provider_name(), "tokio");
}
