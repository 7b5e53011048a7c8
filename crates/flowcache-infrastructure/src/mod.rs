//! # Infrastructure Layer
//!
//! The caching and telemetry components, plus the cross-cutting technical
//! concerns they need. Backend implementations live in
//! `flowcache-providers`; everything here talks to them through the
//! `CacheBackend` port.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Key building, cache store with degrade mode, method wrappers |
//! | [`execution`] | Status-aware execution cache with recency indices |
//!
//! ### Telemetry
//! | Module | Description |
//! |--------|-------------|
//! | [`metrics`] | Metric recording, statistics and performance reports |
//!
//! ### Configuration & Lifecycle
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration |
//! | [`constants`] | Centralized configuration constants |
//! | [`lifecycle`] | Runtime construction, health probe, shutdown |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod execution;
pub mod lifecycle;
pub mod logging;
pub mod metrics;
pub mod utils;

// Re-export commonly used types
pub use cache::{CacheOptions, CacheStore, KeyBuilder};
pub use error_ext::ErrorContext;
pub use execution::ExecutionResultCache;
pub use lifecycle::CacheRuntime;
pub use metrics::{MetricsRecorder, ReportGenerator};
pub use utils::TimedOperation;
