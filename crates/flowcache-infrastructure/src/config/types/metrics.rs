//! Metrics configuration types

use flowcache_domain::constants::{REAL_TIME_WINDOW_SECS, REPORT_TOP_N, RETENTION_DAYS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Days of history every series keeps
    pub retention_days: u32,

    /// Trailing window of the real-time view, in seconds
    pub real_time_window_secs: u64,

    /// Length of top-N report lists
    pub top_n: usize,
}

impl MetricsConfig {
    /// Retention window as a duration
    pub fn retention(&self) -> Duration {
        Duration::from_secs(u64::from(self.retention_days) * 24 * 60 * 60)
    }

    /// Real-time window as a duration
    pub fn real_time_window(&self) -> Duration {
        Duration::from_secs(self.real_time_window_secs)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            retention_days: RETENTION_DAYS,
            real_time_window_secs: REAL_TIME_WINDOW_SECS,
            top_n: REPORT_TOP_N,
        }
    }
}
