//! Cache Backend Port
//!
//! The primitive set a key-value store must expose for the cache core:
//! plain values with expiry, pattern scans, sorted collections (recency
//! indices and metric series), plain sets and hash counters.
//!
//! Any store exposing these primitives is sufficient. An in-memory map with
//! expiry serves tests and single-process deployments; a networked server
//! is expected in production.
//!
//! ## Pattern dialect
//!
//! `scan` accepts a glob with `*` (any run of characters, including the
//! key separator), `?` (one character), `[abc]` / `[a-z]` classes and `\`
//! escapes. Keys that legitimately contain one of `\ * ? [ ] { }` must be
//! escaped with a backslash when used as a literal inside a pattern.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Remaining lifetime of a key as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (or already expired)
    Missing,
    /// The key exists without an expiry
    Persistent,
    /// The key expires after the given duration
    Expires(Duration),
}

impl KeyTtl {
    /// Remaining seconds, or `-1` when the key is missing or never expires
    pub fn as_secs(&self) -> i64 {
        match self {
            Self::Expires(remaining) => remaining.as_secs() as i64,
            Self::Missing | Self::Persistent => -1,
        }
    }
}

/// Key-value backend interface
///
/// All calls are asynchronous and may fail with
/// [`Error::Backend`](crate::Error::Backend). Callers decide whether a
/// failure is swallowed (read path, derived components) or surfaced.
///
/// Sorted-collection ranks follow the usual convention: ranks are ordered
/// by ascending score (ties by member), negative ranks count from the end
/// and `stop` is inclusive.
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Get a string value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a string value, replacing any previous value and expiry
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Delete keys of any type, returning how many existed
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// List keys matching a glob pattern
    async fn scan(&self, pattern: &str) -> Result<Vec<String>>;

    /// Whether a key exists and has not expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remaining lifetime of a key
    async fn ttl(&self, key: &str) -> Result<KeyTtl>;

    /// Set or refresh the expiry of an existing key
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Add or re-score a member of a sorted collection
    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<()>;

    /// Members between two ranks, ascending or (`rev`) descending by score
    async fn zrange(&self, key: &str, start: isize, stop: isize, rev: bool)
    -> Result<Vec<String>>;

    /// Members whose score lies in `[min, max]`, ascending by score
    async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>>;

    /// Remove members between two ranks, returning how many were removed
    async fn zrem_range_by_rank(&self, key: &str, start: isize, stop: isize) -> Result<u64>;

    /// Remove members whose score lies in `[min, max]`
    async fn zrem_range_by_score(&self, key: &str, min: f64, max: f64) -> Result<u64>;

    /// Number of members in a sorted collection
    async fn zcard(&self, key: &str) -> Result<u64>;

    /// Add a member to a plain set, returning whether it was new
    async fn sadd(&self, key: &str, member: &str) -> Result<bool>;

    /// All members of a plain set
    async fn smembers(&self, key: &str) -> Result<Vec<String>>;

    /// Increment a hash counter field, returning the new value
    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> Result<i64>;

    /// All counter fields of a hash
    async fn hget_all(&self, key: &str) -> Result<HashMap<String, i64>>;

    /// Cheap health check
    async fn ping(&self) -> Result<()>;

    /// Drop every key (maintenance and tests)
    async fn flush(&self) -> Result<()>;

    /// Get the name/identifier of this backend implementation
    fn provider_name(&self) -> &str;
}
