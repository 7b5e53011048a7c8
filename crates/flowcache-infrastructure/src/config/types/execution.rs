//! Execution result cache configuration types

use flowcache_domain::constants::{
    RECENT_LIMIT, RECENT_TTL_SECS, TTL_ERROR_SECS, TTL_RUNNING_SECS, TTL_SUCCESS_SECS,
};
use serde::{Deserialize, Serialize};

/// Execution result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// TTL of records that finished successfully
    pub ttl_success_secs: u64,

    /// TTL of records that finished with an error
    pub ttl_error_secs: u64,

    /// TTL of records still running or waiting
    pub ttl_running_secs: u64,

    /// Maximum ids kept per recency index
    pub recent_limit: usize,

    /// TTL refreshed on every recency index write
    pub recent_ttl_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            ttl_success_secs: TTL_SUCCESS_SECS,
            ttl_error_secs: TTL_ERROR_SECS,
            ttl_running_secs: TTL_RUNNING_SECS,
            recent_limit: RECENT_LIMIT,
            recent_ttl_secs: RECENT_TTL_SECS,
        }
    }
}
