//! Cache Store Tests

use crate::test_utils::memory_store;
use flowcache_domain::ports::CacheBackend;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Workflow {
    id: String,
    nodes: u32,
}

#[tokio::test]
async fn test_set_get_and_expiry() {
    let (store, _, clock) = memory_store("app");
    let workflow = Workflow {
        id: "wf-1".to_string(),
        nodes: 3,
    };

    store
        .set("workflow:wf-1", &workflow, Some(Duration::from_secs(60)))
        .await
        .unwrap();
    assert_eq!(store.get::<Workflow>("workflow:wf-1").await, Some(workflow));

    clock.advance(Duration::from_secs(61));
    assert_eq!(store.get::<Workflow>("workflow:wf-1").await, None);
}

#[tokio::test]
async fn test_keys_are_namespaced() {
    let (store, backend, _) = memory_store("app");

    store.set("a:b", &json!(1), None).await.unwrap();

    assert!(backend.exists("app:a:b").await.unwrap());
    assert!(!backend.exists("a:b").await.unwrap());
}

#[tokio::test]
async fn test_default_ttl_applies_when_none_given() {
    let (store, _, _) = memory_store("app");
    let store = store.with_default_ttl(Duration::from_secs(120));

    store.set("k", &json!("v"), None).await.unwrap();

    assert_eq!(store.ttl("k").await, 120);
}

#[tokio::test]
async fn test_ttl_of_missing_key_is_negative_one() {
    let (store, _, _) = memory_store("app");
    assert_eq!(store.ttl("missing").await, -1);
    assert!(!store.exists("missing").await);
}

#[tokio::test]
async fn test_delete_reports_existence() {
    let (store, _, _) = memory_store("app");
    store.set("k", &json!(1), None).await.unwrap();

    assert!(store.delete("k").await.unwrap());
    assert!(!store.delete("k").await.unwrap());
}

#[tokio::test]
async fn test_delete_pattern_stays_in_namespace() {
    let (store, _, _) = memory_store("app");
    let other = store.namespaced("other");
    for key in ["user:1", "user:2", "team:1"] {
        store.set(key, &json!(key), None).await.unwrap();
    }
    other.set("user:1", &json!("x"), None).await.unwrap();

    let removed = store.delete_pattern("user:*").await.unwrap();

    assert_eq!(removed, 2);
    assert!(store.exists("team:1").await);
    assert!(other.exists("user:1").await);
}

#[tokio::test]
async fn test_delete_pattern_without_matches() {
    let (store, _, _) = memory_store("app");
    assert_eq!(store.delete_pattern("nothing:*").await.unwrap(), 0);
}

#[tokio::test]
async fn test_undecodable_entry_counts_as_miss() {
    let (store, backend, _) = memory_store("app");
    backend.set("app:k", "not json", None).await.unwrap();

    assert_eq!(store.get::<Workflow>("k").await, None);
    assert_eq!(store.get_stats().await.misses, 1);
}

#[tokio::test]
async fn test_stats_hit_rate() {
    let (store, _, _) = memory_store("app");
    store.set("k", &json!(1), None).await.unwrap();

    for _ in 0..7 {
        let _ = store.get::<i32>("k").await;
    }
    for _ in 0..3 {
        let _ = store.get::<i32>("missing").await;
    }

    let stats = store.get_stats().await;
    assert_eq!(stats.hits, 7);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.sets, 1);
    assert_eq!(stats.hit_rate, 70.0);
}

#[tokio::test]
async fn test_stats_are_zero_when_idle() {
    let (store, _, _) = memory_store("app");
    let stats = store.get_stats().await;

    assert_eq!(stats.hits + stats.misses, 0);
    assert_eq!(stats.hit_rate, 0.0);
}

#[tokio::test]
async fn test_stats_are_shared_through_backend() {
    let (store, _, _) = memory_store("app");
    let peer = store.namespaced("app");
    store.set("k", &json!(1), None).await.unwrap();
    let _ = store.get::<i32>("k").await;

    assert_eq!(peer.get_stats().await.hits, 1);
}

#[tokio::test]
async fn test_reset_stats() {
    let (store, _, _) = memory_store("app");
    let _ = store.get::<i32>("missing").await;

    store.reset_stats().await.unwrap();

    assert_eq!(store.get_stats().await.misses, 0);
}
