//! Timing Utility Tests

use flowcache_infrastructure::utils::TimedOperation;
use std::thread::sleep;
use std::time::Duration;

#[test]
fn test_timed_operation_reports_fractional_ms() {
    let timer = TimedOperation::start();
    sleep(Duration::from_millis(10));
    assert!(timer.elapsed_ms_f64() >= 10.0);
}
