//! Cache Wrapping Tests

use mlc_infrastructure::cache::{CacheManager, default_key};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    id: u64,
    name: String,
}

fn manager() -> CacheManager {
    CacheManager::builder().build().unwrap()
}

#[tokio::test]
async fn test_wrap_computes_once() {
    let cache = manager();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let load = cache
        .wrap(|id: &u64| format!("user:{id}"), Some(Duration::from_secs(3600)))
        .around(move |id: u64| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(Profile {
                    id,
                    name: format!("user-{id}"),
                })
            }
        });

    let first = load.call(42).await.unwrap();
    let second = load.call(42).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        cache.get::<Profile>("user:42").await.map(|p| p.name),
        Some("user-42".to_string())
    );
}

#[tokio::test]
async fn test_wrap_does_not_cache_errors() {
    let cache = manager();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let flaky = cache.wrap(|id: &u64| format!("flaky:{id}"), None).around(move |_id: u64| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<u64, _>("backend down")
        }
    });

    assert_eq!(flaky.call(1).await, Err("backend down"));
    assert_eq!(flaky.call(1).await, Err("backend down"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.get_value("flaky:1").await.is_none());
}

#[tokio::test]
async fn test_wrap_default_keys_by_arguments() {
    let cache = manager();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let add = cache.wrap_default("sum", None).around_sync(move |(a, b): (i64, i64)| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, std::convert::Infallible>(a + b)
    });

    assert_eq!(add.call((2, 3)).await, Ok(5));
    assert_eq!(add.call((2, 3)).await, Ok(5));
    assert_eq!(add.call((3, 2)).await, Ok(5));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let key = default_key("sum", &(2, 3)).unwrap();
    assert_eq!(cache.get::<i64>(&key).await, Some(5));
}
