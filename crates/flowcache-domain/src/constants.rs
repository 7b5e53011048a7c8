//! Domain-level constants
//!
//! Defaults for the execution TTL table, recency indices and metric
//! retention. All of them are overridable through configuration.

// ============================================================================
// EXECUTION RESULT CACHE
// ============================================================================

/// TTL for executions that finished successfully (1 hour)
pub const TTL_SUCCESS_SECS: u64 = 3600;

/// TTL for executions that finished with an error (30 minutes)
pub const TTL_ERROR_SECS: u64 = 1800;

/// TTL for executions still running or waiting (5 minutes)
pub const TTL_RUNNING_SECS: u64 = 300;

/// Maximum number of ids kept in each recency index
pub const RECENT_LIMIT: usize = 100;

/// TTL of a recency index; shorter than any record TTL
pub const RECENT_TTL_SECS: u64 = 600;

// ============================================================================
// METHOD CACHE
// ============================================================================

/// Default TTL applied by the method cache wrappers (5 minutes)
pub const DEFAULT_API_TTL_SECS: u64 = 300;

// ============================================================================
// METRICS
// ============================================================================

/// Retention window of every metric series
pub const RETENTION_DAYS: u32 = 7;

/// Trailing window used by the real-time stats view
pub const REAL_TIME_WINDOW_SECS: u64 = 60;

/// Length of the top-N lists in performance reports
pub const REPORT_TOP_N: usize = 10;

// ============================================================================
// KEYS
// ============================================================================

/// Separator between key components
pub const KEY_SEPARATOR: &str = ":";

/// Default cache namespace
pub const DEFAULT_NAMESPACE: &str = "flowcache";

/// Characters with special meaning in the key pattern dialect
pub const GLOB_SPECIAL_CHARS: &[char] = &['\\', '*', '?', '[', ']', '{', '}'];
