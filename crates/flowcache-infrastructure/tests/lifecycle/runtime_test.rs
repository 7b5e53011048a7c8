//! Cache Runtime Tests

use crate::test_utils::test_clock;
use flowcache_domain::ports::Clock;
use flowcache_domain::value_objects::{ExecutionRecord, ExecutionStatus};
use flowcache_infrastructure::config::AppConfig;
use flowcache_infrastructure::lifecycle::CacheRuntime;
use flowcache_providers::InMemoryBackend;
use std::sync::Arc;
use std::time::Duration;

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.cache.namespace = "runtime".to_string();
    config.resilience.retry_attempts = 0;
    config.resilience.failure_threshold = 1;
    config.resilience.probe_interval_secs = 1;
    config
}

#[tokio::test]
async fn test_init_from_default_config() {
    let runtime = CacheRuntime::init(AppConfig::default()).await.unwrap();

    assert_eq!(runtime.store().backend().provider_name(), "memory");
    assert_eq!(runtime.store().namespace(), "flowcache");

    runtime.shutdown().await;
    assert!(runtime.is_shut_down());
}

#[tokio::test]
async fn test_init_rejects_invalid_config() {
    let mut config = AppConfig::default();
    config.execution.recent_limit = 0;

    assert!(CacheRuntime::init(config).await.is_err());
}

#[tokio::test]
async fn test_components_share_one_backend() {
    let clock = test_clock();
    let backend = InMemoryBackend::with_clock(clock.clone() as Arc<dyn Clock>);
    let runtime = CacheRuntime::init_with_backend(
        fast_config(),
        Arc::new(backend.clone()),
        clock.clone() as Arc<dyn Clock>,
    )
    .await
    .unwrap();

    let record = ExecutionRecord::new("e1", "wf-1", ExecutionStatus::Running, clock.now());
    runtime.executions().set("e1", &record, None).await.unwrap();
    runtime.metrics().record_execution("wf-1", 10.0, None).await;

    assert!(runtime.store().exists("execution:e1").await);
    let report = runtime.reports().get_real_time_stats().await.unwrap();
    assert_eq!(report.execution.summary.count, 1);

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_probe_task_reenables_store() {
    let clock = test_clock();
    let backend = InMemoryBackend::with_clock(clock.clone() as Arc<dyn Clock>);
    let runtime = CacheRuntime::init_with_backend(
        fast_config(),
        Arc::new(backend.clone()),
        clock as Arc<dyn Clock>,
    )
    .await
    .unwrap();

    backend.set_available(false);
    let _ = runtime.store().get::<i32>("k").await;
    assert!(runtime.store().is_disabled());

    backend.set_available(true);
    let mut restored = false;
    for _ in 0..30 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if !runtime.store().is_disabled() {
            restored = true;
            break;
        }
    }
    assert!(restored, "probe should re-enable the store");

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_is_idempotent() {
    let runtime = CacheRuntime::init(AppConfig::default()).await.unwrap();

    runtime.shutdown().await;
    runtime.shutdown().await;

    assert!(runtime.is_shut_down());
}
