//! Degrade breaker
//!
//! Counts consecutive failed backend calls. Once the count reaches the
//! threshold the breaker opens and the cache store stops calling the
//! backend until a health probe succeeds. Transitions are logged once,
//! never per call.

use flowcache_domain::value_objects::BackendState;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{info, warn};

/// Consecutive-failure breaker shared by every view of a cache store
#[derive(Debug)]
pub struct DegradeBreaker {
    failures: AtomicU32,
    disabled: AtomicBool,
    threshold: u32,
}

impl DegradeBreaker {
    /// Create a closed breaker opening after `threshold` failures
    pub fn new(threshold: u32) -> Self {
        Self {
            failures: AtomicU32::new(0),
            disabled: AtomicBool::new(false),
            threshold: threshold.max(1),
        }
    }

    /// Failures needed to open the breaker
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether backend calls are currently skipped
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Current state
    pub fn state(&self) -> BackendState {
        if self.is_disabled() {
            BackendState::Disabled
        } else {
            BackendState::Enabled
        }
    }

    /// Consecutive failures since the last success
    pub fn consecutive_failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Reset the failure streak after a successful call
    pub fn record_success(&self) {
        self.failures.store(0, Ordering::SeqCst);
    }

    /// Count a failed call, opening the breaker at the threshold
    ///
    /// Returns `true` when this call caused the transition.
    pub fn record_failure(&self, operation: &str) -> bool {
        let failures = self.failures.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        if failures >= self.threshold && !self.disabled.swap(true, Ordering::SeqCst) {
            warn!(
                operation = operation,
                failures = failures,
                "Cache backend disabled after consecutive failures"
            );
            return true;
        }
        false
    }

    /// Close the breaker after a successful probe
    ///
    /// Returns `true` when the breaker was open.
    pub fn restore(&self) -> bool {
        self.failures.store(0, Ordering::SeqCst);
        if self.disabled.swap(false, Ordering::SeqCst) {
            info!("Cache backend re-enabled after successful health probe");
            return true;
        }
        false
    }
}
