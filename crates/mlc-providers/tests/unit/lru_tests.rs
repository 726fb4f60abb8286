//! LRU Entry Store Tests

use mlc_domain::ports::providers::EntryStore;
use mlc_providers::cache::LruEntryStore;
use serde_json::json;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_lru_basic_operations() {
    let store = LruEntryStore::with_capacity(10);

    store.set("user:1", json!({"name": "ada"}), MINUTE).await;
    assert_eq!(store.get("user:1").await, Some(json!({"name": "ada"})));

    assert!(store.delete("user:1").await);
    assert_eq!(store.get("user:1").await, None);

    // Idempotent delete
    assert!(!store.delete("user:1").await);
}

#[tokio::test]
async fn test_lru_evicts_least_recently_used() {
    let store = LruEntryStore::with_capacity(2);

    store.set("a", json!(1), MINUTE).await;
    store.set("b", json!(2), MINUTE).await;
    // Touch "a" so "b" becomes the eviction candidate
    assert_eq!(store.get("a").await, Some(json!(1)));
    store.set("c", json!(3), MINUTE).await;

    assert_eq!(store.get("a").await, Some(json!(1)));
    assert_eq!(store.get("b").await, None);
    assert_eq!(store.get("c").await, Some(json!(3)));
    assert_eq!(store.entry_count().await, 2);
}

#[tokio::test]
async fn test_lru_overwrite_does_not_evict() {
    let store = LruEntryStore::with_capacity(2);

    store.set("a", json!(1), MINUTE).await;
    store.set("b", json!(2), MINUTE).await;
    store.set("a", json!(10), MINUTE).await;

    assert_eq!(store.get("a").await, Some(json!(10)));
    assert_eq!(store.get("b").await, Some(json!(2)));
}

#[tokio::test]
async fn test_lru_zero_ttl_stores_nothing() {
    let store = LruEntryStore::with_capacity(4);

    store.set("k", json!("old"), MINUTE).await;
    store.set("k", json!("new"), Duration::ZERO).await;

    assert_eq!(store.get("k").await, None);
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn test_lru_expired_entries_are_invisible_and_purged() {
    let store = LruEntryStore::with_capacity(4);

    store.set("short", json!(1), Duration::from_millis(20)).await;
    store.set("long", json!(2), MINUTE).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(store.keys().await, vec!["long".to_string()]);
    assert_eq!(store.entry_count().await, 1);
    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.purge_expired().await, 0);
    assert_eq!(store.get("short").await, None);
}

#[tokio::test]
async fn test_lru_delete_matching() {
    let store = LruEntryStore::with_capacity(10);

    store.set("tasks:1:page:1", json!(1), MINUTE).await;
    store.set("tasks:1:page:2", json!(2), MINUTE).await;
    store.set("tasks:2:page:1", json!(3), MINUTE).await;

    let mut removed = store
        .delete_matching(&|key: &str| key.starts_with("tasks:1:"))
        .await;

    removed.sort();
    assert_eq!(removed, vec!["tasks:1:page:1", "tasks:1:page:2"]);
    assert_eq!(store.keys().await, vec!["tasks:2:page:1".to_string()]);
}

#[tokio::test]
async fn test_lru_zero_capacity_is_raised_to_one() {
    let store = LruEntryStore::with_capacity(0);
    assert_eq!(store.capacity(), 1);

    store.set("a", json!(1), MINUTE).await;
    store.set("b", json!(2), MINUTE).await;
    assert_eq!(store.entry_count().await, 1);
    assert_eq!(store.get("b").await, Some(json!(2)));
}

#[tokio::test]
async fn test_lru_clear() {
    let store = LruEntryStore::new();
    store.set("a", json!(1), MINUTE).await;
    store.set("b", json!(2), MINUTE).await;

    store.clear().await;

    assert_eq!(store.entry_count().await, 0);
    assert_eq!(store.provider_name(), "lru");
}

#[tokio::test]
async fn test_lru_delete_matching_reports_live_keys_only() {
    let store = LruEntryStore::with_capacity(10);

    store.set("tasks:1:live", json!(1), MINUTE).await;
    store.set("tasks:1:stale", json!(2), Duration::from_millis(10)).await;
    tokio::time::sleep(Duration::from_millis(30)).await;

    let removed = store
        .delete_matching(&|key: &str| key.starts_with("tasks:1:"))
        .await;

    assert_eq!(removed, vec!["tasks:1:live".to_string()]);
    assert_eq!(store.entry_count().await, 0);
}

#[tokio::test]
async fn test_lru_unbounded_ttl_is_kept() {
    let store = LruEntryStore::with_capacity(4);

    store.set("forever", json!(1), Duration::from_secs(u64::MAX)).await;
    store.set("max", json!(2), Duration::MAX).await;

    assert_eq!(store.purge_expired().await, 0);
    assert_eq!(store.get("forever").await, Some(json!(1)));
    assert_eq!(store.get("max").await, Some(json!(2)));
}
