//! Backend Factory Tests

use crate::test_utils::test_clock;
use flowcache_domain::ports::Clock;
use flowcache_infrastructure::cache::BackendFactory;
use flowcache_infrastructure::config::{CacheConfig, CacheProviderKind};
use std::sync::Arc;

fn clock() -> Arc<dyn Clock> {
    test_clock()
}

#[tokio::test]
async fn test_memory_provider_by_default() {
    let backend = BackendFactory::create_from_config(&CacheConfig::default(), clock())
        .await
        .unwrap();
    assert_eq!(backend.provider_name(), "memory");
}

#[tokio::test]
async fn test_disabled_cache_uses_null_backend() {
    let config = CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    };
    let backend = BackendFactory::create_from_config(&config, clock())
        .await
        .unwrap();

    assert_eq!(backend.provider_name(), "null");
    backend.set("k", "v", None).await.unwrap();
    assert!(backend.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unreachable_redis_falls_back_to_null() {
    let config = CacheConfig {
        provider: CacheProviderKind::Redis,
        redis_url: Some("redis://127.0.0.1:1".to_string()),
        ..CacheConfig::default()
    };
    let backend = BackendFactory::create_from_config(&config, clock())
        .await
        .unwrap();

    assert_eq!(backend.provider_name(), "null");
}
