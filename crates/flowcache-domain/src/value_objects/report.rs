//! Performance reports
//!
//! The historical report and the real-time view share these types; only
//! the time range differs.

use super::metric::MetricEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Count, mean and nearest-rank percentiles of a set of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesSummary {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean, `0` when empty
    pub average: f64,
    /// 50th percentile
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Execution durations plus the slowest individual executions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    /// Duration summary
    pub summary: SeriesSummary,
    /// Slowest executions by value, descending
    pub slowest: Vec<MetricEvent>,
}

/// Per-endpoint response time aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSummary {
    /// Endpoint series name (`METHOD:/path`)
    pub endpoint: String,
    /// Number of calls in range
    pub count: usize,
    /// Mean response time
    pub average: f64,
}

/// API response times plus the slowest endpoints on average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiReport {
    /// Response time summary over every endpoint
    pub summary: SeriesSummary,
    /// Slowest endpoints by average, descending
    pub slowest_endpoints: Vec<EndpointSummary>,
}

/// Memory samples with extremes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MemoryReport {
    /// Sample summary (its `average` is the mean usage)
    pub summary: SeriesSummary,
    /// Lowest sample, `0` when empty
    pub min: f64,
    /// Highest sample, `0` when empty
    pub max: f64,
}

/// Cache access aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    /// Summary of recorded access values
    pub summary: SeriesSummary,
    /// Sum of hit values
    pub hits: f64,
    /// Sum of miss values
    pub misses: f64,
    /// `hits / (hits + misses)`, `0` when both are zero
    pub hit_rate: f64,
}

/// Aggregated metrics over `[start, end]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Range start (inclusive)
    pub start: DateTime<Utc>,
    /// Range end (inclusive)
    pub end: DateTime<Utc>,
    /// When the report was computed
    pub generated_at: DateTime<Utc>,
    /// Execution category
    pub execution: ExecutionReport,
    /// API category
    pub api: ApiReport,
    /// Memory category
    pub memory: MemoryReport,
    /// Cache category
    pub cache: CacheReport,
}
