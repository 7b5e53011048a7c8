//! Null backend
//!
//! Accepts every write and stores nothing. Selected when caching is
//! switched off, or as the fallback when the configured store cannot be
//! reached at start-up.

use async_trait::async_trait;
use flowcache_domain::error::Result;
use flowcache_domain::ports::{CacheBackend, KeyTtl};
use std::collections::HashMap;
use std::time::Duration;

/// Backend that doesn't store anything
///
/// # Example
///
/// ```
/// use flowcache_domain::ports::CacheBackend;
/// use flowcache_providers::NullBackend;
///
/// let backend = NullBackend::new();
/// assert_eq!(backend.provider_name(), "null");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64> {
        Ok(0)
    }

    async fn scan(&self, _pattern: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn ttl(&self, _key: &str) -> Result<KeyTtl> {
        Ok(KeyTtl::Missing)
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool> {
        Ok(false)
    }

    async fn zadd(&self, _key: &str, _score: f64, _member: &str) -> Result<()> {
        Ok(())
    }

    async fn zrange(
        &self,
        _key: &str,
        _start: isize,
        _stop: isize,
        _rev: bool,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn zrange_by_score(&self, _key: &str, _min: f64, _max: f64) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn zrem_range_by_rank(&self, _key: &str, _start: isize, _stop: isize) -> Result<u64> {
        Ok(0)
    }

    async fn zrem_range_by_score(&self, _key: &str, _min: f64, _max: f64) -> Result<u64> {
        Ok(0)
    }

    async fn zcard(&self, _key: &str) -> Result<u64> {
        Ok(0)
    }

    async fn sadd(&self, _key: &str, _member: &str) -> Result<bool> {
        Ok(false)
    }

    async fn smembers(&self, _key: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn hincr_by(&self, _key: &str, _field: &str, delta: i64) -> Result<i64> {
        Ok(delta)
    }

    async fn hget_all(&self, _key: &str) -> Result<HashMap<String, i64>> {
        Ok(HashMap::new())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
