//! Execution TTL Policy Tests

use flowcache_domain::value_objects::ExecutionStatus;
use flowcache_infrastructure::config::ExecutionConfig;
use flowcache_infrastructure::execution::TtlPolicy;
use std::time::Duration;

#[test]
fn test_configured_ttls() {
    let config = ExecutionConfig {
        ttl_success_secs: 10,
        ttl_error_secs: 20,
        ttl_running_secs: 30,
        ..ExecutionConfig::default()
    };
    let policy = TtlPolicy::from_config(&config);

    assert_eq!(policy.for_status(ExecutionStatus::Success), Duration::from_secs(10));
    assert_eq!(policy.for_status(ExecutionStatus::Error), Duration::from_secs(20));
    assert_eq!(policy.for_status(ExecutionStatus::Running), Duration::from_secs(30));
    assert_eq!(policy.for_status(ExecutionStatus::Waiting), Duration::from_secs(30));
}
