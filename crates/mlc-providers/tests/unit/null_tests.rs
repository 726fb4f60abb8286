//! Null Provider Tests

use futures::StreamExt;
use mlc_domain::events::InvalidationMessage;
use mlc_domain::ports::providers::{DistributedStore, EntryStore, InvalidationBus};
use mlc_providers::cache::NullEntryStore;
use mlc_providers::distributed::NullDistributedStore;
use mlc_providers::events::NullInvalidationBus;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_null_entry_store_never_hits() {
    let store = NullEntryStore::new();
    store.set("k", json!(1), Duration::from_secs(60)).await;
    assert_eq!(store.get("k").await, None);
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn test_null_distributed_store_succeeds_empty() {
    let store = NullDistributedStore::new();
    store.set_json("k", "1", Duration::from_secs(60)).await.unwrap();
    assert!(store.get_json("k").await.unwrap().is_none());
    assert!(store.keys_matching("*").await.unwrap().is_empty());
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_null_bus_stream_ends() {
    let bus = NullInvalidationBus::new();
    bus.publish(&InvalidationMessage::new("*", "manual"))
        .await
        .unwrap();
    let mut stream = bus.subscribe().await.unwrap();
    assert!(stream.next().await.is_none());
}
