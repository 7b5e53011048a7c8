//! # Flowcache
//!
//! Caching and telemetry core for a workflow-automation backend: a
//! namespaced key-value cache with method wrappers, a status-aware
//! execution result cache, and a time-series metrics recorder with
//! percentile reports.
//!
//! ## Example
//!
//! ```ignore
//! use flowcache::infrastructure::config::ConfigLoader;
//! use flowcache::infrastructure::lifecycle::CacheRuntime;
//! use flowcache::{ExecutionRecord, ExecutionStatus};
//!
//! let runtime = CacheRuntime::init(ConfigLoader::new().load()?).await?;
//!
//! let record = ExecutionRecord::new("exec-1", "wf-1", ExecutionStatus::Running, chrono::Utc::now());
//! runtime.executions().set("exec-1", &record, None).await?;
//! runtime.metrics().record_execution("wf-1", 840.0, None).await;
//!
//! let stats = runtime.reports().get_real_time_stats().await?;
//! runtime.shutdown().await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, ports and the error type
//! - `providers` - backend implementations (in-memory, Redis, null) and clocks
//! - `infrastructure` - cache store, execution cache, metrics, config, logging

pub mod cli;

/// Domain layer - types, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use flowcache_domain::*;
}

/// Providers layer - backend and clock implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use flowcache_providers::*;
}

/// Infrastructure layer - caching, telemetry, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use flowcache_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the main entry points at the crate root
pub use infrastructure::{CacheRuntime, CacheStore, ExecutionResultCache, MetricsRecorder};
