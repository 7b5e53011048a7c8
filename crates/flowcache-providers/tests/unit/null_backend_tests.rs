//! Tests for the null backend

use flowcache_domain::ports::{CacheBackend, KeyTtl};
use flowcache_providers::NullBackend;

#[tokio::test]
async fn test_null_backend_stores_nothing() {
    let backend = NullBackend::new();

    backend.set("k", "v", None).await.unwrap();
    backend.zadd("z", 1.0, "m").await.unwrap();

    assert!(backend.get("k").await.unwrap().is_none());
    assert_eq!(backend.ttl("k").await.unwrap(), KeyTtl::Missing);
    assert!(backend.zrange("z", 0, -1, false).await.unwrap().is_empty());
    assert!(backend.ping().await.is_ok());
}
