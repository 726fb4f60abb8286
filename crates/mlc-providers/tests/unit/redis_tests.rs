//! Redis Provider Tests
//!
//! Require a Redis server on `MLC_TEST_REDIS_URL` (default
//! `redis://127.0.0.1:6379`). Run with `--ignored`.

use futures::StreamExt;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::{DistributedStore, InvalidationBus};
use mlc_providers::distributed::{RedisDistributedStore, RedisStoreOptions};
use mlc_providers::events::RedisInvalidationBus;
use std::time::Duration;

fn redis_url() -> String {
    std::env::var("MLC_TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn store() -> RedisDistributedStore {
    let options = RedisStoreOptions {
        namespace: Some(format!("mlc-test-{}", std::process::id())),
        ..RedisStoreOptions::default()
    };
    RedisDistributedStore::new(&redis_url(), options).unwrap()
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_store_roundtrip_and_scan() {
    let store = store();
    store.ping().await.unwrap();

    store
        .set_json("tasks:42:page:1", "1", Duration::from_secs(30))
        .await
        .unwrap();
    store
        .set_json("tasks:42:page:2", "2", Duration::from_secs(30))
        .await
        .unwrap();
    assert_eq!(
        store.get_json("tasks:42:page:1").await.unwrap().as_deref(),
        Some("1")
    );

    let keys = store.keys_matching("tasks:42:*").await.unwrap();
    assert_eq!(keys, vec!["tasks:42:page:1", "tasks:42:page:2"]);
    assert_eq!(store.delete_many(&keys).await.unwrap(), 2);
    assert!(store.get_json("tasks:42:page:2").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_bus_delivers_to_subscriber() {
    let channel = format!("mlc-test-{}", std::process::id());
    let bus = RedisInvalidationBus::new(&redis_url())
        .unwrap()
        .with_channel(channel);
    let mut stream = bus.subscribe().await.unwrap();

    let message = InvalidationMessage::new("tasks:*", "manual");
    bus.publish(&message).await.unwrap();

    let received = tokio::time::timeout(Duration::from_secs(2), stream.next())
        .await
        .unwrap();
    assert_eq!(received, Some(message));
}

#[tokio::test]
async fn test_redis_store_unreachable_is_unavailable() {
    let options = RedisStoreOptions {
        operation_timeout: Duration::from_millis(200),
        ..RedisStoreOptions::default()
    };
    // Port 1 is never a Redis server
    let store = RedisDistributedStore::new("redis://127.0.0.1:1", options).unwrap();

    let err = store.get_json("k").await.unwrap_err();
    assert!(err.is_unavailable());
}
