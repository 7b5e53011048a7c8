//! Bounded retry with capped backoff
//!
//! Each backend call gets a small fixed number of retries before the
//! failure counts toward the degrade breaker. The delay doubles after each
//! attempt up to a ceiling.

use crate::config::ResilienceConfig;
use flowcache_domain::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Retry policy for backend primitives
///
/// Only backend errors are retried; invalid arguments and serialization
/// failures return immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Ceiling of the doubling delay
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Create a retry policy
    pub fn new(max_retries: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Build the policy from the resilience section
    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_initial_delay_ms),
            Duration::from_millis(config.retry_max_delay_ms),
        )
    }

    /// Delay before retry number `retry` (zero-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Run `attempt` until it succeeds, fails permanently or retries run out
    pub async fn execute<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_backend() && retry < self.max_retries => {
                    let delay = self.backoff(retry);
                    debug!(
                        operation = operation,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying backend call"
                    );
                    sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ResilienceConfig::default())
    }
}
