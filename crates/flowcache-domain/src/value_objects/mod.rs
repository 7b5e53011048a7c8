//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ExecutionRecord`] | Cached snapshot of a workflow execution |
//! | [`ExecutionStatus`] | Lifecycle state that selects the record TTL |
//! | [`MetricEvent`] | One point of a `(type, name)` time series |
//! | [`MetricType`] | Report category of a metric series |
//! | [`CacheStats`] | Hit/miss/set/delete counters of a namespace |
//! | [`CacheHealth`] | Degrade-mode state of a cache store |
//! | [`PerformanceReport`] | Aggregated view over a time range |

/// Cache counters and health
pub mod cache;
/// Workflow execution records
pub mod execution;
/// Key pattern helpers
pub mod key_pattern;
/// Metric events
pub mod metric;
/// Performance reports
pub mod report;

pub use cache::{BackendState, CacheHealth, CacheStats};
pub use execution::{ExecutionRecord, ExecutionStatus};
pub use key_pattern::escape_glob;
pub use metric::{MetricEvent, MetricType};
pub use report::{
    ApiReport, CacheReport, EndpointSummary, ExecutionReport, MemoryReport, PerformanceReport,
    SeriesSummary,
};
