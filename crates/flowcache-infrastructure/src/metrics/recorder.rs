//! Metrics recorder
//!
//! Each `(type, name)` series is a sorted collection scored by event
//! timestamp in epoch milliseconds, stored under `metrics:{type}:{name}`.
//! Members are JSON events tagged with a random id, so two identical
//! measurements in the same millisecond stay distinct.
//!
//! Every write trims the series to the retention window and refreshes its
//! TTL; a series nobody writes to disappears after one retention period.
//! Series names are registered in `metric-names:{type}` so a type can be
//! read back without scanning keys.

use crate::cache::CacheStore;
use crate::config::MetricsConfig;
use crate::constants::{MEMORY_SERIES_NAME, METRIC_NAMES_SEGMENT};
use crate::error_ext::ErrorContext;
use crate::utils::TimedOperation;
use chrono::{DateTime, Utc};
use flowcache_domain::error::Result;
use flowcache_domain::ports::Clock;
use flowcache_domain::value_objects::{MetricEvent, MetricType};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct StoredMetric {
    id: Uuid,
    #[serde(flatten)]
    event: MetricEvent,
}

fn series_key(metric_type: MetricType, name: &str) -> String {
    format!("metrics:{metric_type}:{name}")
}

fn names_key(metric_type: MetricType) -> String {
    format!("{METRIC_NAMES_SEGMENT}:{metric_type}")
}

/// Appends metric events and reads series back
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    store: CacheStore,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl MetricsRecorder {
    /// Create a recorder with the default retention window
    pub fn new(store: CacheStore, clock: Arc<dyn Clock>) -> Self {
        Self::from_config(store, &MetricsConfig::default(), clock)
    }

    /// Create a recorder from the metrics section
    pub fn from_config(store: CacheStore, config: &MetricsConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            retention: config.retention(),
        }
    }

    /// Retention window of every series
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Clock used to stamp events
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Append one event to the `(metric_type, name)` series
    ///
    /// `timestamp` defaults to now. Events older than the retention window
    /// (relative to now) are trimmed from the series on the same call.
    /// Backend failures are returned; see the `record_*` helpers for the
    /// fire-and-forget variants.
    pub async fn record_metric(
        &self,
        metric_type: MetricType,
        name: &str,
        value: f64,
        timestamp: Option<DateTime<Utc>>,
        metadata: Option<Value>,
    ) -> Result<()> {
        let now = self.clock.now();
        let timestamp = timestamp.unwrap_or(now);
        let mut event = MetricEvent::new(metric_type, name, value, timestamp);
        event.metadata = metadata;

        let member = serde_json::to_string(&StoredMetric {
            id: Uuid::new_v4(),
            event,
        })
        .serialization_context(format!("Failed to encode metric {metric_type}:{name}"))?;
        let member = member.as_str();

        let series = self.store.key(&series_key(metric_type, name));
        let names = self.store.key(&names_key(metric_type));
        let (series, names) = (series.as_str(), names.as_str());
        let score = timestamp.timestamp_millis() as f64;
        let cutoff = (now.timestamp_millis() - self.retention.as_millis() as i64) as f64;
        let retention = self.retention;

        self.store
            .call("ZADD", move |backend| async move {
                backend.zadd(series, score, member).await
            })
            .await?;
        self.store
            .call("SADD", move |backend| async move {
                backend.sadd(names, name).await
            })
            .await?;
        self.store
            .call("ZREMRANGEBYSCORE", move |backend| async move {
                backend.zrem_range_by_score(series, f64::MIN, cutoff - 1.0).await
            })
            .await?;
        for key in [series, names] {
            self.store
                .call("EXPIRE", move |backend| async move {
                    backend.expire(key, retention).await
                })
                .await?;
        }
        Ok(())
    }

    /// Events of one series, or of every series of the type when `name` is
    /// `None`, with timestamps in `[start, end]`
    ///
    /// Results are ordered by timestamp, then name, then value.
    pub async fn get_metrics(
        &self,
        metric_type: MetricType,
        name: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricEvent>> {
        let names = match name {
            Some(name) => vec![name.to_string()],
            None => {
                let names_key = self.store.key(&names_key(metric_type));
                let key = names_key.as_str();
                self.store
                    .call("SMEMBERS", move |backend| async move {
                        backend.smembers(key).await
                    })
                    .await?
            }
        };

        let (min, max) = (
            start.timestamp_millis() as f64,
            end.timestamp_millis() as f64,
        );
        let mut events = Vec::new();
        for name in &names {
            let series = self.store.key(&series_key(metric_type, name));
            let key = series.as_str();
            let members = self
                .store
                .call("ZRANGEBYSCORE", move |backend| async move {
                    backend.zrange_by_score(key, min, max).await
                })
                .await?;
            for member in members {
                match serde_json::from_str::<StoredMetric>(&member) {
                    Ok(stored) => events.push(stored.event),
                    Err(e) => warn!(series = %series, error = %e, "Skipping undecodable metric"),
                }
            }
        }

        events.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.value.total_cmp(&b.value))
        });
        Ok(events)
    }
}

// Fire-and-forget helpers for instrumentation call sites
impl MetricsRecorder {
    async fn record_quietly(
        &self,
        metric_type: MetricType,
        name: &str,
        value: f64,
        metadata: Option<Value>,
    ) {
        if let Err(e) = self
            .record_metric(metric_type, name, value, None, metadata)
            .await
        {
            debug!(metric_type = %metric_type, name = name, error = %e, "Metric dropped");
        }
    }

    /// Record a workflow execution duration in milliseconds
    pub async fn record_execution(&self, workflow_id: &str, duration_ms: f64, metadata: Option<Value>) {
        self.record_quietly(MetricType::Execution, workflow_id, duration_ms, metadata)
            .await;
    }

    /// Record an HTTP response time under `METHOD:path`
    pub async fn record_api_call(&self, method: &str, path: &str, duration_ms: f64, status: u16) {
        let name = format!("{}:{path}", method.to_ascii_uppercase());
        self.record_quietly(MetricType::Api, &name, duration_ms, Some(json!({ "status": status })))
            .await;
    }

    /// Record a process memory sample in bytes
    pub async fn record_memory(&self, bytes: u64) {
        self.record_quietly(MetricType::Memory, MEMORY_SERIES_NAME, bytes as f64, None)
            .await;
    }

    /// Record one cache access as `hit` / `miss`, prefixed by the namespace
    /// when one is given
    pub async fn record_cache_access(&self, namespace: Option<&str>, hit: bool) {
        let outcome = if hit { "hit" } else { "miss" };
        let name = match namespace {
            Some(ns) => format!("{ns}:{outcome}"),
            None => outcome.to_string(),
        };
        self.record_quietly(MetricType::Cache, &name, 1.0, None).await;
    }

    /// Run `fut` and record its duration as an API call
    ///
    /// The status is `200` when the future succeeds and `500` otherwise.
    /// The future's result is returned untouched.
    pub async fn time_api<T, E, Fut>(
        &self,
        method: &str,
        path: &str,
        fut: Fut,
    ) -> std::result::Result<T, E>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let timer = TimedOperation::start();
        let result = fut.await;
        let status = if result.is_ok() { 200 } else { 500 };
        self.record_api_call(method, path, timer.elapsed_ms_f64(), status)
            .await;
        result
    }
}
