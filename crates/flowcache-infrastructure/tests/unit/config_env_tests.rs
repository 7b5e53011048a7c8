//! Environment override tests for the configuration loader
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p flowcache-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```

use flowcache_infrastructure::config::{CacheProviderKind, ConfigLoader};
use std::env;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_override() {
    set_env("FLOWCACHE__CACHE__NAMESPACE", "from-env");
    set_env("FLOWCACHE__EXECUTION__RECENT_LIMIT", "42");

    let config = ConfigLoader::new().load().expect("Should load config");

    assert_eq!(config.cache.namespace, "from-env");
    assert_eq!(config.execution.recent_limit, 42);

    remove_env("FLOWCACHE__CACHE__NAMESPACE");
    remove_env("FLOWCACHE__EXECUTION__RECENT_LIMIT");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_selects_redis_provider() {
    set_env("FLOWCACHE__CACHE__PROVIDER", "redis");
    set_env("FLOWCACHE__CACHE__REDIS_URL", "redis://cache.internal:6379");

    let config = ConfigLoader::new().load().expect("Should load config");

    assert_eq!(config.cache.provider, CacheProviderKind::Redis);
    assert_eq!(
        config.cache.redis_url.as_deref(),
        Some("redis://cache.internal:6379")
    );

    remove_env("FLOWCACHE__CACHE__PROVIDER");
    remove_env("FLOWCACHE__CACHE__REDIS_URL");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails_fast() {
    set_env("FLOWCACHE__EXECUTION__TTL_SUCCESS_SECS", "0");

    let result = ConfigLoader::new().load();

    remove_env("FLOWCACHE__EXECUTION__TTL_SUCCESS_SECS");
    assert!(result.is_err());
}
