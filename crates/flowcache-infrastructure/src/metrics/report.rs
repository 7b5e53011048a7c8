//! Performance reports
//!
//! The historical report and the real-time view run the same aggregation;
//! the real-time view only fixes the range to the trailing window.

use super::recorder::MetricsRecorder;
use super::stats::{cache_report, memory_report, slowest, summarize_events, top_endpoints};
use crate::config::MetricsConfig;
use chrono::{DateTime, Utc};
use flowcache_domain::error::{Error, Result};
use flowcache_domain::value_objects::{
    ApiReport, ExecutionReport, MetricEvent, MetricType, PerformanceReport,
};
use std::time::Duration;
use tracing::debug;

/// Aggregate already-fetched events into a report
///
/// Each slice must hold the events of its own category.
#[allow(clippy::too_many_arguments)]
pub fn build_report(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    generated_at: DateTime<Utc>,
    execution: &[MetricEvent],
    api: &[MetricEvent],
    memory: &[MetricEvent],
    cache: &[MetricEvent],
    top_n: usize,
) -> PerformanceReport {
    PerformanceReport {
        start,
        end,
        generated_at,
        execution: ExecutionReport {
            summary: summarize_events(execution),
            slowest: slowest(execution, top_n),
        },
        api: ApiReport {
            summary: summarize_events(api),
            slowest_endpoints: top_endpoints(api, top_n),
        },
        memory: memory_report(memory),
        cache: cache_report(cache),
    }
}

/// Builds performance reports from recorded metrics
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    recorder: MetricsRecorder,
    top_n: usize,
    window: Duration,
}

impl ReportGenerator {
    /// Create a generator with default top-N and real-time window
    pub fn new(recorder: MetricsRecorder) -> Self {
        Self::from_config(recorder, &MetricsConfig::default())
    }

    /// Create a generator from the metrics section
    pub fn from_config(recorder: MetricsRecorder, config: &MetricsConfig) -> Self {
        Self {
            recorder,
            top_n: config.top_n,
            window: config.real_time_window(),
        }
    }

    /// Report over `[start, end]`
    ///
    /// Backend failures while reading any series are returned.
    pub async fn generate_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PerformanceReport> {
        if start > end {
            return Err(Error::invalid_argument(format!(
                "Report range start {start} is after end {end}"
            )));
        }
        let (execution, api, memory, cache) = futures::try_join!(
            self.recorder.get_metrics(MetricType::Execution, None, start, end),
            self.recorder.get_metrics(MetricType::Api, None, start, end),
            self.recorder.get_metrics(MetricType::Memory, None, start, end),
            self.recorder.get_metrics(MetricType::Cache, None, start, end),
        )?;
        debug!(
            executions = execution.len(),
            api_calls = api.len(),
            memory_samples = memory.len(),
            cache_accesses = cache.len(),
            "Aggregating performance report"
        );

        Ok(build_report(
            start,
            end,
            self.recorder.clock().now(),
            &execution,
            &api,
            &memory,
            &cache,
            self.top_n,
        ))
    }

    /// Report over the trailing real-time window
    pub async fn get_real_time_stats(&self) -> Result<PerformanceReport> {
        let end = self.recorder.clock().now();
        let window = chrono::Duration::from_std(self.window)
            .map_err(|e| Error::invalid_argument(format!("Real-time window out of range: {e}")))?;
        self.generate_report(end - window, end).await
    }
}
