//! Moka Entry Store Tests

use mlc_domain::ports::providers::EntryStore;
use mlc_providers::cache::MokaEntryStore;
use serde_json::json;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_moka_basic_operations() {
    let store = MokaEntryStore::new();

    store.set("test_key", json!({"data": "test data", "number": 42}), MINUTE).await;
    assert_eq!(
        store.get("test_key").await,
        Some(json!({"data": "test data", "number": 42}))
    );

    assert!(store.delete("test_key").await);
    assert!(!store.delete("test_key").await);
    assert_eq!(store.get("test_key").await, None);
}

#[tokio::test]
async fn test_moka_per_entry_ttl() {
    let store = MokaEntryStore::new();

    store.set("short", json!(1), Duration::from_millis(30)).await;
    store.set("long", json!(2), MINUTE).await;
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(store.get("short").await, None);
    assert_eq!(store.get("long").await, Some(json!(2)));
}

#[tokio::test]
async fn test_moka_zero_ttl_removes_previous() {
    let store = MokaEntryStore::new();

    store.set("k", json!(1), MINUTE).await;
    store.set("k", json!(2), Duration::ZERO).await;

    assert_eq!(store.get("k").await, None);
}

#[tokio::test]
async fn test_moka_delete_matching_and_clear() {
    let store = MokaEntryStore::with_max_bytes(1024 * 1024);

    store.set("tasks:1:a", json!(1), MINUTE).await;
    store.set("tasks:1:b", json!(2), MINUTE).await;
    store.set("users:1", json!(3), MINUTE).await;

    let mut removed = store
        .delete_matching(&|key: &str| key.starts_with("tasks:"))
        .await;
    removed.sort();
    assert_eq!(removed, vec!["tasks:1:a", "tasks:1:b"]);
    assert_eq!(store.entry_count().await, 1);

    store.clear().await;
    assert_eq!(store.entry_count().await, 0);
    assert_eq!(store.provider_name(), "moka");
}

#[tokio::test]
async fn test_moka_unbounded_ttl_is_kept() {
    let store = MokaEntryStore::new();

    store.set("forever", json!(1), Duration::from_secs(u64::MAX)).await;
    store.set("max", json!(2), Duration::MAX).await;

    assert_eq!(store.purge_expired().await, 0);
    assert_eq!(store.get("forever").await, Some(json!(1)));
    assert_eq!(store.get("max").await, Some(json!(2)));
}
