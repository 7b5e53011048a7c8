//! Spy backend counting the primitives a component issues

use async_trait::async_trait;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::{CacheBackend, KeyTtl};
use flowcache_providers::InMemoryBackend;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory backend that counts scans, deletes and writes
///
/// Writes can be rejected on their own while every other primitive keeps
/// working.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: InMemoryBackend,
    scans: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
    reject_sets: Arc<AtomicBool>,
}

impl RecordingBackend {
    pub fn new(inner: InMemoryBackend) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &InMemoryBackend {
        &self.inner
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn reject_sets(&self, reject: bool) {
        self.reject_sets.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheBackend for RecordingBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.reject_sets.load(Ordering::SeqCst) {
            return Err(Error::backend("SET", "write rejected"));
        }
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(keys).await
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.inner.scan(pattern).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.exists(key).await
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        self.inner.ttl(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<()> {
        self.inner.zadd(key, score, member).await
    }

    async fn zrange(
        &self,
        key: &str,
        start: isize,
        stop: isize,
        rev: bool,
    ) -> Result<Vec<String>> {
        self.inner.zrange(key, start, stop, rev).await
    }

    async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        self.inner.zrange_by_score(key, min, max).await
    }

    async fn zrem_range_by_rank(&self, key: &str, start: isize, stop: isize) -> Result<u64> {
        self.inner.zrem_range_by_rank(key, start, stop).await
    }

    async fn zrem_range_by_score(&self, key: &str, min: f64, max: f64) -> Result<u64> {
        self.inner.zrem_range_by_score(key, min, max).await
    }

    async fn zcard(&self, key: &str) -> Result<u64> {
        self.inner.zcard(key).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        self.inner.sadd(key, member).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.inner.smembers(key).await
    }

    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        self.inner.hincr_by(key, field, delta).await
    }

    async fn hget_all(&self, key: &str) -> Result<HashMap<String, i64>> {
        self.inner.hget_all(key).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}
