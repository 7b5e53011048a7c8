//! Resilience configuration types

use crate::constants::{
    FAILURE_THRESHOLD, PROBE_INTERVAL_SECS, RETRY_ATTEMPTS, RETRY_INITIAL_DELAY_MS,
    RETRY_MAX_DELAY_MS,
};
use serde::{Deserialize, Serialize};

/// Resilience configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Retries after the first failed backend call
    pub retry_attempts: u32,

    /// Delay before the first retry in milliseconds
    pub retry_initial_delay_ms: u64,

    /// Cap of the doubling retry delay in milliseconds
    pub retry_max_delay_ms: u64,

    /// Consecutive failed calls before the store is disabled
    pub failure_threshold: u32,

    /// Seconds between health probes while disabled
    pub probe_interval_secs: u64,
}

/// Returns default resilience configuration with:
/// - 2 retries, 50 ms initial delay capped at 500 ms
/// - degrade mode after 5 consecutive failures
/// - a health probe every 30 seconds
impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry_attempts: RETRY_ATTEMPTS,
            retry_initial_delay_ms: RETRY_INITIAL_DELAY_MS,
            retry_max_delay_ms: RETRY_MAX_DELAY_MS,
            failure_threshold: FAILURE_THRESHOLD,
            probe_interval_secs: PROBE_INTERVAL_SECS,
        }
    }
}
