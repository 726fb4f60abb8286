//! Memory Distributed Store Tests

use mlc_domain::error::Error;
use mlc_domain::ports::providers::DistributedStore;
use mlc_providers::distributed::MemoryDistributedStore;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_memory_store_roundtrip() {
    let store = MemoryDistributedStore::new();

    store.set_json("k", r#"{"v":1}"#, MINUTE).await.unwrap();
    assert_eq!(store.get_json("k").await.unwrap().as_deref(), Some(r#"{"v":1}"#));

    assert!(store.delete("k").await.unwrap());
    assert!(!store.delete("k").await.unwrap());
    assert!(store.get_json("k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_memory_store_expiry() {
    let store = MemoryDistributedStore::new();

    store.set_json("k", "1", Duration::from_millis(20)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(store.get_json("k").await.unwrap().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_memory_store_keys_matching_uses_glob() {
    let store = MemoryDistributedStore::new();
    for key in ["tasks:42:page:1", "tasks:42:page:2", "tasks:99:page:1", "users:42"] {
        store.set_json(key, "1", MINUTE).await.unwrap();
    }

    let mut keys = store.keys_matching("tasks:42:*").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["tasks:42:page:1", "tasks:42:page:2"]);

    let removed = store.delete_many(&keys).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_memory_store_unavailable() {
    let store = MemoryDistributedStore::new();
    store.set_json("k", "1", MINUTE).await.unwrap();

    store.set_available(false);
    let err = store.get_json("k").await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(store.ping().await.unwrap_err().is_unavailable());
    assert!(store.set_json("x", "1", MINUTE).await.is_err());

    store.set_available(true);
    assert_eq!(store.get_json("k").await.unwrap().as_deref(), Some("1"));
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_memory_store_unbounded_ttl_is_kept() {
    let store = MemoryDistributedStore::new();

    store.set_json("forever", "1", Duration::from_secs(u64::MAX)).await.unwrap();
    store.set_json("max", "2", Duration::MAX).await.unwrap();

    assert_eq!(store.get_json("forever").await.unwrap().as_deref(), Some("1"));
    assert_eq!(store.get_json("max").await.unwrap().as_deref(), Some("2"));
    assert_eq!(store.keys_matching("*").await.unwrap().len(), 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_memory_store_non_utf8_value_is_corrupt() {
    let store = MemoryDistributedStore::new();
    store.set_bytes("blob", vec![0xc3, 0x28], MINUTE);

    let err = store.get_json("blob").await.unwrap_err();
    assert!(matches!(err, Error::Corrupt { ref key, .. } if key == "blob"));

    // Still deletable through the normal path
    assert!(store.delete("blob").await.unwrap());
}
