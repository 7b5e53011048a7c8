//! Timing instrumentation helpers

use std::time::Instant;

/// Tracks the elapsed time of one operation
///
/// # Example
///
/// ```
/// use flowcache_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// let elapsed = timer.elapsed_ms_f64();
/// assert!(elapsed >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start timing now
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Fractional milliseconds since start, as recorded in metric series
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
