//! Cache counters and health

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hash field names used to persist [`CacheStats`] counters
pub const STAT_FIELDS: [&str; 4] = ["hits", "misses", "sets", "deletes"];

/// Cache Operation Statistics
///
/// Monotonically non-negative counters of one cache namespace. Only an
/// explicit reset brings them back to zero.
///
/// # Example
///
/// ```
/// use flowcache_domain::CacheStats;
///
/// let stats = CacheStats::from_counters(7, 3, 0, 0);
/// assert_eq!(stats.hit_rate, 70.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (including reads skipped by degrade mode)
    pub misses: u64,
    /// Number of successful writes
    pub sets: u64,
    /// Number of deleted keys
    pub deletes: u64,
    /// Hit rate in percent, rounded to two decimals
    pub hit_rate: f64,
}

impl CacheStats {
    /// Build stats from raw counters, deriving the hit rate
    pub fn from_counters(hits: u64, misses: u64, sets: u64, deletes: u64) -> Self {
        Self {
            hits,
            misses,
            sets,
            deletes,
            hit_rate: Self::calculate_hit_rate(hits, misses),
        }
    }

    /// Build stats from a persisted counter hash; unknown fields are ignored
    pub fn from_hash(fields: &HashMap<String, i64>) -> Self {
        let read = |name: &str| fields.get(name).copied().unwrap_or(0).max(0) as u64;
        Self::from_counters(read("hits"), read("misses"), read("sets"), read("deletes"))
    }

    /// `hits / (hits + misses)` in percent with two decimals, `0` when idle
    pub fn calculate_hit_rate(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            return 0.0;
        }
        let percent = hits as f64 / total as f64 * 100.0;
        (percent * 100.0).round() / 100.0
    }
}

/// Whether a cache store is talking to its backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendState {
    /// Operations reach the backend
    Enabled,
    /// Degrade mode: operations are no-ops until a probe succeeds
    Disabled,
}

/// Degrade-mode snapshot of a cache store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheHealth {
    /// Backend implementation name
    pub provider: String,
    /// Current state
    pub state: BackendState,
    /// Consecutive failed backend calls since the last success
    pub consecutive_failures: u32,
}
