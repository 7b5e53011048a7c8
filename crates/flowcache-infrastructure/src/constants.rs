//! Infrastructure layer constants
//!
//! Defaults for configuration loading, logging and the resilience layer.
//! Cache-domain defaults (TTLs, limits, retention) live in
//! `flowcache_domain::constants`.

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "flowcache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "flowcache";

/// Prefix of environment variable overrides (`FLOWCACHE__CACHE__NAMESPACE`)
pub const CONFIG_ENV_PREFIX: &str = "FLOWCACHE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a `tracing` filter directive
pub const LOG_FILTER_ENV: &str = "FLOWCACHE_LOG";

/// Fallback file stem for the rolling log file
pub const DEFAULT_LOG_FILE_STEM: &str = "flowcache";

// ============================================================================
// CACHE BACKEND
// ============================================================================

/// Default Redis connection URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Hash field suffix holding the counters of a namespace (`{ns}:stats`)
pub const STATS_KEY_SUFFIX: &str = "stats";

/// Maximum number of keys per `DEL` issued by pattern deletion
pub const DELETE_BATCH_SIZE: usize = 500;

// ============================================================================
// RESILIENCE
// ============================================================================

/// Retries after the first failed backend call
pub const RETRY_ATTEMPTS: u32 = 2;

/// Delay before the first retry in milliseconds
pub const RETRY_INITIAL_DELAY_MS: u64 = 50;

/// Upper bound of the exponential retry delay in milliseconds
pub const RETRY_MAX_DELAY_MS: u64 = 500;

/// Consecutive failed calls before the store enters degrade mode
pub const FAILURE_THRESHOLD: u32 = 5;

/// Interval between health probes while degraded, in seconds
pub const PROBE_INTERVAL_SECS: u64 = 30;

// ============================================================================
// METRICS
// ============================================================================

/// Series name used for process memory samples
pub const MEMORY_SERIES_NAME: &str = "process";

/// Metric names set key segment (`{ns}:metric-names:{type}`)
pub const METRIC_NAMES_SEGMENT: &str = "metric-names";
