//! Main application configuration

use super::{
    CacheConfig, ExecutionConfig, LoggingConfig, MetricsConfig, ResilienceConfig,
};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// Every section falls back to its defaults, so a TOML file only needs the
/// values it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Cache backend and namespace
    pub cache: CacheConfig,
    /// Execution result cache TTLs and recency limits
    pub execution: ExecutionConfig,
    /// Metric retention and report shape
    pub metrics: MetricsConfig,
    /// Retry and degrade-mode behaviour
    pub resilience: ResilienceConfig,
    /// Logging output
    pub logging: LoggingConfig,
}
