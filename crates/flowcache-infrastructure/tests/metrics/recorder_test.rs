//! Metrics Recorder Tests

use crate::test_utils::memory_store;
use chrono::Duration as ChronoDuration;
use flowcache_domain::ports::{CacheBackend, Clock};
use flowcache_domain::value_objects::MetricType;
use flowcache_infrastructure::metrics::MetricsRecorder;
use flowcache_providers::{InMemoryBackend, ManualClock};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn recorder() -> (MetricsRecorder, InMemoryBackend, Arc<ManualClock>) {
    let (store, backend, clock) = memory_store("app");
    let recorder = MetricsRecorder::new(store, clock.clone() as Arc<dyn Clock>);
    (recorder, backend, clock)
}

#[tokio::test]
async fn test_record_and_read_back() {
    let (recorder, _, clock) = recorder();
    let at = clock.now();

    recorder
        .record_metric(MetricType::Execution, "wf-1", 120.0, Some(at), Some(json!({"nodes": 4})))
        .await
        .unwrap();

    let events = recorder
        .get_metrics(MetricType::Execution, Some("wf-1"), at, at)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "wf-1");
    assert_eq!(events[0].value, 120.0);
    assert_eq!(events[0].timestamp, at);
    assert_eq!(events[0].metadata, Some(json!({"nodes": 4})));
}

#[tokio::test]
async fn test_identical_events_are_kept() {
    let (recorder, _, clock) = recorder();
    let at = clock.now();

    for _ in 0..3 {
        recorder
            .record_metric(MetricType::Api, "GET:/health", 5.0, Some(at), None)
            .await
            .unwrap();
    }

    let events = recorder
        .get_metrics(MetricType::Api, Some("GET:/health"), at, at)
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
    let (recorder, _, clock) = recorder();
    let start = clock.now();
    for offset in [0, 10, 20] {
        recorder
            .record_metric(
                MetricType::Memory,
                "process",
                f64::from(offset),
                Some(start + ChronoDuration::seconds(offset.into())),
                None,
            )
            .await
            .unwrap();
    }

    let events = recorder
        .get_metrics(
            MetricType::Memory,
            Some("process"),
            start,
            start + ChronoDuration::seconds(10),
        )
        .await
        .unwrap();
    let values: Vec<f64> = events.iter().map(|e| e.value).collect();
    assert_eq!(values, [0.0, 10.0]);
}

#[tokio::test]
async fn test_merge_all_series_of_a_type() {
    let (recorder, _, clock) = recorder();
    let start = clock.now();
    recorder
        .record_metric(MetricType::Execution, "wf-b", 2.0, Some(start), None)
        .await
        .unwrap();
    recorder
        .record_metric(MetricType::Execution, "wf-a", 3.0, Some(start), None)
        .await
        .unwrap();
    recorder
        .record_metric(
            MetricType::Execution,
            "wf-a",
            1.0,
            Some(start - ChronoDuration::seconds(1)),
            None,
        )
        .await
        .unwrap();
    recorder
        .record_metric(MetricType::Api, "GET:/x", 9.0, Some(start), None)
        .await
        .unwrap();

    let events = recorder
        .get_metrics(
            MetricType::Execution,
            None,
            start - ChronoDuration::minutes(1),
            start,
        )
        .await
        .unwrap();

    let names: Vec<(&str, f64)> = events.iter().map(|e| (e.name.as_str(), e.value)).collect();
    assert_eq!(names, [("wf-a", 1.0), ("wf-a", 3.0), ("wf-b", 2.0)]);
}

#[tokio::test]
async fn test_old_events_are_trimmed_on_write() {
    let (recorder, backend, clock) = recorder();
    let long_ago = clock.now() - ChronoDuration::days(8);
    recorder
        .record_metric(MetricType::Execution, "wf-1", 1.0, Some(long_ago), None)
        .await
        .unwrap();

    recorder
        .record_metric(MetricType::Execution, "wf-1", 2.0, None, None)
        .await
        .unwrap();

    assert_eq!(backend.zcard("app:metrics:execution:wf-1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_series_expire_after_retention() {
    let (recorder, backend, clock) = recorder();
    recorder
        .record_metric(MetricType::Cache, "hit", 1.0, None, None)
        .await
        .unwrap();

    assert_eq!(
        backend.ttl("app:metrics:cache:hit").await.unwrap().as_secs(),
        7 * 24 * 60 * 60
    );
    clock.advance(Duration::from_secs(7 * 24 * 60 * 60 + 1));
    assert!(!backend.exists("app:metrics:cache:hit").await.unwrap());
}

#[tokio::test]
async fn test_helpers_name_series() {
    let (recorder, _, clock) = recorder();
    let start = clock.now();

    recorder.record_api_call("get", "/workflows", 12.0, 200).await;
    recorder.record_memory(1024).await;
    recorder.record_cache_access(Some("workflows"), true).await;
    recorder.record_cache_access(None, false).await;
    recorder.record_execution("wf-1", 99.0, None).await;

    let api = recorder
        .get_metrics(MetricType::Api, None, start, start)
        .await
        .unwrap();
    assert_eq!(api[0].name, "GET:/workflows");
    assert_eq!(api[0].metadata, Some(json!({"status": 200})));

    let memory = recorder
        .get_metrics(MetricType::Memory, Some("process"), start, start)
        .await
        .unwrap();
    assert_eq!(memory[0].value, 1024.0);

    let cache: Vec<String> = recorder
        .get_metrics(MetricType::Cache, None, start, start)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(cache, ["miss", "workflows:hit"]);
}

#[tokio::test]
async fn test_time_api_records_status() {
    let (recorder, _, clock) = recorder();
    let start = clock.now();

    let ok = recorder
        .time_api("POST", "/run", async { Ok::<_, String>(5) })
        .await;
    let err = recorder
        .time_api("POST", "/run", async { Err::<u32, _>("boom".to_string()) })
        .await;

    assert_eq!(ok, Ok(5));
    assert!(err.is_err());
    let statuses: Vec<_> = recorder
        .get_metrics(MetricType::Api, Some("POST:/run"), start, start)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|e| e.metadata)
        .map(|m| m["status"].as_u64())
        .collect();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.contains(&Some(200)));
    assert!(statuses.contains(&Some(500)));
}

#[tokio::test]
async fn test_recording_fails_when_backend_down() {
    let (recorder, backend, _) = recorder();
    backend.set_available(false);

    assert!(
        recorder
            .record_metric(MetricType::Execution, "wf-1", 1.0, None, None)
            .await
            .is_err()
    );
    recorder.record_execution("wf-1", 1.0, None).await;
}
