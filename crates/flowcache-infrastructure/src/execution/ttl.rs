//! TTL table for execution records

use crate::config::ExecutionConfig;
use flowcache_domain::value_objects::ExecutionStatus;
use std::time::Duration;

/// Record TTL per execution status
///
/// Finished executions are stable and live longest; running or waiting
/// ones change soon and expire quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// TTL of successful executions
    pub success: Duration,
    /// TTL of failed executions
    pub error: Duration,
    /// TTL of running and waiting executions
    pub running: Duration,
}

impl TtlPolicy {
    /// Build the table from configuration
    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self {
            success: Duration::from_secs(config.ttl_success_secs),
            error: Duration::from_secs(config.ttl_error_secs),
            running: Duration::from_secs(config.ttl_running_secs),
        }
    }

    /// TTL for a record in `status`
    pub fn for_status(&self, status: ExecutionStatus) -> Duration {
        match status {
            ExecutionStatus::Success => self.success,
            ExecutionStatus::Error => self.error,
            ExecutionStatus::Running | ExecutionStatus::Waiting => self.running,
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::from_config(&ExecutionConfig::default())
    }
}
