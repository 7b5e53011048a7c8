//! Configuration types module

pub mod app;
pub mod cache;
pub mod execution;
pub mod logging;
pub mod metrics;
pub mod resilience;

// Re-export main types
pub use app::AppConfig;
pub use cache::{CacheConfig, CacheProviderKind};
pub use execution::ExecutionConfig;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use resilience::ResilienceConfig;
