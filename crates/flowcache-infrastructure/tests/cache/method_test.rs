//! Method Cache Wrapper Tests

use crate::test_utils::{RecordingBackend, memory_store, test_clock};
use flowcache_domain::ports::Clock;
use flowcache_infrastructure::cache::{
    CacheOptions, CacheStore, EvictionPatterns, RetryPolicy, cache_evict, cache_put, cacheable,
};
use flowcache_providers::InMemoryBackend;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn recording_store() -> (CacheStore, RecordingBackend) {
    let clock = test_clock();
    let backend = RecordingBackend::new(InMemoryBackend::with_clock(clock as Arc<dyn Clock>));
    let store = CacheStore::new(Arc::new(backend.clone()), "app").with_retry(RetryPolicy::none());
    (store, backend)
}

#[tokio::test]
async fn test_cacheable_serves_hits_without_calling() {
    let (store, _, _) = memory_store("app");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lookup = cacheable(
        store,
        move |id: String| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(format!("workflow {id}"))
            }
        },
        CacheOptions::new("workflows"),
    );

    assert_eq!(lookup("wf-1".to_string()).await.unwrap(), "workflow wf-1");
    assert_eq!(lookup("wf-1".to_string()).await.unwrap(), "workflow wf-1");
    assert_eq!(lookup("wf-2".to_string()).await.unwrap(), "workflow wf-2");

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cacheable_does_not_cache_errors() {
    let (store, _, _) = memory_store("app");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let failing = cacheable(
        store.clone(),
        move |_: u32| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>("boom".to_string())
            }
        },
        CacheOptions::new("failing"),
    );

    assert!(failing(1).await.is_err());
    assert!(failing(1).await.is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!store.exists("failing:1").await);
}

#[tokio::test]
async fn test_cacheable_uses_ttl_and_canonical_key() {
    let (store, _, clock) = memory_store("app");
    let lookup = cacheable(
        store.clone(),
        |args: Value| async move { Ok::<_, String>(args["b"].clone()) },
        CacheOptions::new("search").with_ttl(Duration::from_secs(30)),
    );

    lookup(json!({"b": 2, "a": 1})).await.unwrap();

    let key = r#"search:{"a":1,"b":2}"#;
    assert!(store.exists(key).await);
    assert_eq!(store.ttl(key).await, 30);

    clock.advance(Duration::from_secs(31));
    assert!(!store.exists(key).await);
}

#[tokio::test]
async fn test_cacheable_with_custom_key_strategy() {
    let (store, _, _) = memory_store("app");
    let lookup = cacheable(
        store.clone(),
        |args: Value| async move { Ok::<_, String>(args) },
        CacheOptions::new("workflows")
            .with_key_strategy(|args: &Value| args["id"].as_str().unwrap_or_default().to_string()),
    );

    lookup(json!({"id": "wf-9", "verbose": true})).await.unwrap();

    assert!(store.exists("workflows:wf-9").await);
}

#[tokio::test]
async fn test_cacheable_falls_through_when_backend_down() {
    let (store, backend, _) = memory_store("app");
    backend.set_available(false);
    let lookup = cacheable(
        store,
        |id: u32| async move { Ok::<_, String>(id * 2) },
        CacheOptions::new("double"),
    );

    assert_eq!(lookup(21).await.unwrap(), 42);
}

#[tokio::test]
async fn test_cache_evict_skips_eviction_on_error() {
    let (store, backend) = recording_store();
    let update = cache_evict(
        store,
        |_: String| async move { Err::<(), _>("write failed".to_string()) },
        EvictionPatterns::fixed(["workflows:*"]),
    );

    assert!(update("wf-1".to_string()).await.is_err());

    assert_eq!(backend.scans(), 0);
}

#[tokio::test]
async fn test_cache_evict_removes_patterns_on_success() {
    let (store, backend) = recording_store();
    store.set("workflows:wf-1", &json!(1), None).await.unwrap();
    store.set("workflows:wf-2", &json!(2), None).await.unwrap();
    store.set("users:u-1", &json!(3), None).await.unwrap();
    let update = cache_evict(
        store.clone(),
        |_: String| async move { Ok::<_, String>(()) },
        EvictionPatterns::fixed(["workflows:*"]),
    );

    update("wf-1".to_string()).await.unwrap();

    assert_eq!(backend.scans(), 1);
    assert!(!store.exists("workflows:wf-1").await);
    assert!(!store.exists("workflows:wf-2").await);
    assert!(store.exists("users:u-1").await);
}

#[tokio::test]
async fn test_cache_evict_computed_patterns() {
    let (store, _) = recording_store();
    store.set("workflow:wf-1:detail", &json!(1), None).await.unwrap();
    store.set("workflow:wf-2:detail", &json!(2), None).await.unwrap();
    let update = cache_evict(
        store.clone(),
        |id: String| async move { Ok::<_, String>(id) },
        EvictionPatterns::computed(|updated: &String, _: &String| {
            vec![format!("workflow:{updated}:*")]
        }),
    );

    update("wf-1".to_string()).await.unwrap();

    assert!(!store.exists("workflow:wf-1:detail").await);
    assert!(store.exists("workflow:wf-2:detail").await);
}

#[tokio::test]
async fn test_cache_put_always_calls_and_refreshes() {
    let (store, _, _) = memory_store("app");
    let version = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&version);
    let save = cache_put(
        store.clone(),
        move |_: String| {
            let counter = Arc::clone(&counter);
            async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        },
        CacheOptions::new("workflows"),
    );

    save("wf-1".to_string()).await.unwrap();
    save("wf-1".to_string()).await.unwrap();

    assert_eq!(version.load(Ordering::SeqCst), 2);
    assert_eq!(store.get::<usize>(r#"workflows:"wf-1""#).await, Some(2));
}

#[tokio::test]
async fn test_cache_put_does_not_store_errors() {
    let (store, backend) = recording_store();
    let save = cache_put(
        store,
        |_: u32| async move { Err::<u32, _>("invalid".to_string()) },
        CacheOptions::new("workflows"),
    );

    assert!(save(1).await.is_err());
    assert_eq!(backend.sets(), 0);
}
