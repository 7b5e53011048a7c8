//! Degrade Mode Tests
//!
//! An unreachable backend must never fail a read, and repeated failures
//! must switch the store to no-op mode until a probe succeeds.

use crate::test_utils::memory_store;
use flowcache_domain::error::Error;
use flowcache_domain::ports::CacheBackend;
use flowcache_domain::value_objects::BackendState;
use serde_json::json;

#[tokio::test]
async fn test_reads_miss_when_backend_fails() {
    let (store, backend, _) = memory_store("app");
    store.set("k", &json!(1), None).await.unwrap();
    backend.set_available(false);

    assert_eq!(store.get::<i32>("k").await, None);
    assert!(!store.exists("k").await);
    assert_eq!(store.ttl("k").await, -1);
}

#[tokio::test]
async fn test_write_failure_surfaces_before_threshold() {
    let (store, backend, _) = memory_store("app");
    backend.set_available(false);

    let result = store.set("k", &json!(1), None).await;

    assert!(matches!(result, Err(Error::Backend { .. })));
    assert!(!store.is_disabled());
}

#[tokio::test]
async fn test_consecutive_failures_disable_store() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(2);
    backend.set_available(false);

    let _ = store.get::<i32>("a").await;
    let _ = store.get::<i32>("b").await;

    assert!(store.is_disabled());
    let health = store.health();
    assert_eq!(health.state, BackendState::Disabled);
    assert_eq!(health.provider, "memory");
}

#[tokio::test]
async fn test_disabled_store_is_a_no_op() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(1);
    backend.set_available(false);
    let _ = store.get::<i32>("a").await;
    assert!(store.is_disabled());

    backend.set_available(true);

    store.set("k", &json!(1), None).await.unwrap();
    assert_eq!(store.delete_pattern("*").await.unwrap(), 0);
    assert_eq!(store.get::<i32>("k").await, None);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn test_disabled_store_keeps_local_stats() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(1);
    backend.set_available(false);

    let _ = store.get::<i32>("a").await;
    let _ = store.get::<i32>("b").await;

    let stats = store.get_stats().await;
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hit_rate, 0.0);
}

#[tokio::test]
async fn test_probe_restores_store() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(1);
    backend.set_available(false);
    let _ = store.get::<i32>("a").await;

    assert!(!store.probe().await);
    assert!(store.is_disabled());

    backend.set_available(true);
    assert!(store.probe().await);
    assert!(!store.is_disabled());

    store.set("k", &json!(7), None).await.unwrap();
    assert_eq!(store.get::<i32>("k").await, Some(7));
}

#[tokio::test]
async fn test_namespaced_views_share_degrade_state() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(1);
    let other = store.namespaced("other");
    backend.set_available(false);

    let _ = store.get::<i32>("a").await;

    assert!(other.is_disabled());
}

#[tokio::test]
async fn test_success_resets_failure_count() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(2);

    backend.set_available(false);
    let _ = store.get::<i32>("a").await;
    backend.set_available(true);
    let _ = store.get::<i32>("a").await;
    backend.set_available(false);
    let _ = store.get::<i32>("a").await;

    assert!(!store.is_disabled());
    assert_eq!(store.health().consecutive_failures, 1);
}

#[tokio::test]
async fn test_outage_counters_survive_recovery() {
    let (store, backend, _) = memory_store("app");
    let store = store.with_failure_threshold(1);
    store.set("k", &json!(1), None).await.unwrap();
    assert_eq!(store.get_stats().await.sets, 1);

    backend.set_available(false);
    for _ in 0..3 {
        let _ = store.get::<i32>("x").await;
    }
    let during = store.get_stats().await;
    assert_eq!(during.sets, 1);
    assert_eq!(during.misses, 3);

    backend.set_available(true);
    assert!(store.probe().await);

    let after = store.get_stats().await;
    assert_eq!(after.sets, 1);
    assert_eq!(after.misses, 3);
    let hash = backend.hget_all("app:stats").await.unwrap();
    assert_eq!(hash.get("misses"), Some(&3));
}

#[tokio::test]
async fn test_failed_stat_writes_are_retried() {
    let (store, backend, _) = memory_store("app");
    backend.set_available(false);
    let _ = store.get::<i32>("x").await;
    assert!(!store.is_disabled());

    backend.set_available(true);
    let _ = store.get::<i32>("y").await;

    assert_eq!(store.get_stats().await.misses, 2);
}
