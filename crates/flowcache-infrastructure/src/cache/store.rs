//! Cache store
//!
//! Typed JSON cache over a [`CacheBackend`], scoped to one namespace.
//!
//! Read operations (`get`, `exists`, `ttl`) never fail: a backend error is
//! counted as a miss. Write operations return `Result` so that a caller
//! needing durability can react; the method wrappers and derived caches
//! log and swallow those errors.
//!
//! Every backend call goes through a bounded [`RetryPolicy`]. Calls that
//! still fail feed a [`DegradeBreaker`]; once it opens, the store stops
//! calling the backend (reads miss, writes are no-ops) until
//! [`probe`](CacheStore::probe) succeeds.

use super::breaker::DegradeBreaker;
use super::key::KeyBuilder;
use super::retry::RetryPolicy;
use crate::config::AppConfig;
use crate::constants::{DELETE_BATCH_SIZE, FAILURE_THRESHOLD, STATS_KEY_SUFFIX};
use crate::error_ext::ErrorContext;
use crate::logging::log_health_check;
use flowcache_domain::constants::DEFAULT_API_TTL_SECS;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::CacheBackend;
use flowcache_domain::value_objects::cache::STAT_FIELDS;
use flowcache_domain::value_objects::{CacheHealth, CacheStats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// One atomic per stat field
#[derive(Debug, Default)]
struct CounterSet {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl CounterSet {
    fn counter(&self, field: &str) -> Option<&AtomicU64> {
        match field {
            "hits" => Some(&self.hits),
            "misses" => Some(&self.misses),
            "sets" => Some(&self.sets),
            "deletes" => Some(&self.deletes),
            _ => None,
        }
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats::from_counters(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.sets.load(Ordering::Relaxed),
            self.deletes.load(Ordering::Relaxed),
        )
    }

    fn reset(&self) {
        for counter in [&self.hits, &self.misses, &self.sets, &self.deletes] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// In-process mirror of the namespace counters
///
/// `unflushed` holds the deltas the backend hash has not received yet.
#[derive(Debug, Default)]
struct LocalCounters {
    totals: CounterSet,
    unflushed: CounterSet,
}

impl LocalCounters {
    fn add(&self, field: &str, delta: u64) {
        for set in [&self.totals, &self.unflushed] {
            if let Some(counter) = set.counter(field) {
                counter.fetch_add(delta, Ordering::Relaxed);
            }
        }
    }

    fn snapshot(&self) -> CacheStats {
        self.totals.snapshot()
    }

    fn reset(&self) {
        self.totals.reset();
        self.unflushed.reset();
    }
}

/// Namespaced cache store
///
/// Keys passed to the store are relative to its namespace: `get("a:b")`
/// reads `namespace:a:b`. Cloning is cheap and shares the backend, the
/// breaker and the counters.
#[derive(Debug, Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    breaker: Arc<DegradeBreaker>,
    retry: RetryPolicy,
    keys: KeyBuilder,
    default_ttl: Duration,
    counters: Arc<LocalCounters>,
}

// Construction and configuration
impl CacheStore {
    /// Create a store with default retry, threshold and TTL
    pub fn new<S: Into<String>>(backend: Arc<dyn CacheBackend>, namespace: S) -> Self {
        Self {
            backend,
            breaker: Arc::new(DegradeBreaker::new(FAILURE_THRESHOLD)),
            retry: RetryPolicy::default(),
            keys: KeyBuilder::new(namespace),
            default_ttl: Duration::from_secs(DEFAULT_API_TTL_SECS),
            counters: Arc::new(LocalCounters::default()),
        }
    }

    /// Create a store from the cache and resilience sections
    pub fn from_config(backend: Arc<dyn CacheBackend>, config: &AppConfig) -> Self {
        Self::new(backend, config.cache.namespace.clone())
            .with_retry(RetryPolicy::from_config(&config.resilience))
            .with_failure_threshold(config.resilience.failure_threshold)
            .with_default_ttl(config.cache.default_ttl())
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the breaker with a fresh one using `threshold`
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.breaker = Arc::new(DegradeBreaker::new(threshold));
        self
    }

    /// TTL used when a write does not name one
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// A view on another namespace
    ///
    /// Shares the backend and the breaker, so degrade mode is global; stats
    /// are kept per namespace.
    pub fn namespaced<S: Into<String>>(&self, namespace: S) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            breaker: Arc::clone(&self.breaker),
            retry: self.retry,
            keys: KeyBuilder::new(namespace),
            default_ttl: self.default_ttl,
            counters: Arc::new(LocalCounters::default()),
        }
    }
}

// Accessors
impl CacheStore {
    /// Namespace of this store
    pub fn namespace(&self) -> &str {
        self.keys.namespace()
    }

    /// Key builder of this store
    pub fn keys(&self) -> &KeyBuilder {
        &self.keys
    }

    /// Absolute key for a relative one
    pub fn key(&self, relative: &str) -> String {
        self.keys.qualify(relative)
    }

    /// Underlying backend
    pub fn backend(&self) -> &Arc<dyn CacheBackend> {
        &self.backend
    }

    /// Default TTL for writes
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Whether the store is in degrade mode
    pub fn is_disabled(&self) -> bool {
        self.breaker.is_disabled()
    }

    /// Degrade-mode snapshot
    pub fn health(&self) -> CacheHealth {
        CacheHealth {
            provider: self.backend.provider_name().to_string(),
            state: self.breaker.state(),
            consecutive_failures: self.breaker.consecutive_failures(),
        }
    }

    fn stats_key(&self) -> String {
        self.keys.qualify(STATS_KEY_SUFFIX)
    }
}

// Guarded backend access
impl CacheStore {
    /// Run one backend primitive with retry and breaker accounting
    ///
    /// Fails with [`Error::BackendUnavailable`] without calling `f` while
    /// the store is disabled. Keys handed to `f` must already be absolute
    /// (see [`key`](Self::key)).
    pub async fn call<T, F, Fut>(&self, operation: &'static str, mut f: F) -> Result<T>
    where
        F: FnMut(Arc<dyn CacheBackend>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.breaker.is_disabled() {
            return Err(Error::unavailable(operation));
        }
        let result = self
            .retry
            .execute(operation, || f(Arc::clone(&self.backend)))
            .await;
        match &result {
            Ok(_) => self.breaker.record_success(),
            Err(e) if e.is_backend() => {
                self.breaker.record_failure(operation);
            }
            Err(_) => {}
        }
        result
    }

    /// Ping the backend, closing the breaker on success
    pub async fn probe(&self) -> bool {
        let provider = self.backend.provider_name().to_string();
        match self.backend.ping().await {
            Ok(()) => {
                self.breaker.restore();
                log_health_check(&provider, true, None);
                self.flush_stats().await;
                true
            }
            Err(e) => {
                if !self.breaker.is_disabled() {
                    self.breaker.record_failure("PING");
                }
                log_health_check(&provider, false, Some(&e.to_string()));
                false
            }
        }
    }
}

// Cache operations
impl CacheStore {
    /// Get a typed value; `None` on miss, decode failure or backend failure
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full = self.key(key);
        let full_key = full.as_str();
        let raw = match self
            .call("GET", move |backend| async move { backend.get(full_key).await })
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                debug!(operation = "GET", key = %full, error = %e, "Cache read failed, treating as miss");
                None
            }
        };

        let Some(raw) = raw else {
            self.bump("misses", 1).await;
            return None;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                self.bump("hits", 1).await;
                Some(value)
            }
            Err(e) => {
                warn!(key = %full, error = %e, "Discarding undecodable cache entry");
                self.bump("misses", 1).await;
                None
            }
        }
    }

    /// Store a value under `key`, expiring after `ttl` or the default TTL
    ///
    /// Encoding failures are returned even in degrade mode.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)
            .serialization_context(format!("Failed to encode cache value for key {key}"))?;
        let ttl = Some(ttl.unwrap_or(self.default_ttl));
        let full = self.key(key);
        let (full_key, raw) = (full.as_str(), raw.as_str());

        match self
            .call("SET", move |backend| async move {
                backend.set(full_key, raw, ttl).await
            })
            .await
        {
            Ok(()) => {
                self.bump("sets", 1).await;
                Ok(())
            }
            Err(Error::BackendUnavailable { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Delete one key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.delete_many(&[key]).await? > 0)
    }

    /// Delete several keys, returning how many existed
    pub async fn delete_many<S: AsRef<str>>(&self, keys: &[S]) -> Result<u64> {
        let full: Vec<String> = keys.iter().map(|k| self.key(k.as_ref())).collect();
        self.delete_absolute(&full).await
    }

    /// Delete every key matching a glob relative to the namespace
    ///
    /// Scan-then-delete, not atomic: keys written between the two steps
    /// may survive.
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let full = self.keys.qualify_pattern(pattern);
        let full_pattern = full.as_str();
        let keys = match self
            .call("SCAN", move |backend| async move {
                backend.scan(full_pattern).await
            })
            .await
        {
            Ok(keys) => keys,
            Err(Error::BackendUnavailable { .. }) => return Ok(0),
            Err(e) => return Err(e),
        };
        let removed = self.delete_absolute(&keys).await?;
        debug!(pattern = %full, removed = removed, "Deleted keys by pattern");
        Ok(removed)
    }

    async fn delete_absolute(&self, keys: &[String]) -> Result<u64> {
        let mut removed = 0;
        for chunk in keys.chunks(DELETE_BATCH_SIZE) {
            match self
                .call("DEL", move |backend| async move { backend.delete(chunk).await })
                .await
            {
                Ok(count) => removed += count,
                Err(Error::BackendUnavailable { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        self.bump("deletes", removed).await;
        Ok(removed)
    }

    /// Whether `key` exists; `false` on backend failure
    pub async fn exists(&self, key: &str) -> bool {
        let full = self.key(key);
        let full_key = full.as_str();
        match self
            .call("EXISTS", move |backend| async move {
                backend.exists(full_key).await
            })
            .await
        {
            Ok(found) => found,
            Err(e) => {
                debug!(operation = "EXISTS", key = %full, error = %e, "Cache read failed");
                self.bump("misses", 1).await;
                false
            }
        }
    }

    /// Remaining seconds of `key`; `-1` when missing, persistent or unreachable
    pub async fn ttl(&self, key: &str) -> i64 {
        let full = self.key(key);
        let full_key = full.as_str();
        match self
            .call("TTL", move |backend| async move { backend.ttl(full_key).await })
            .await
        {
            Ok(ttl) => ttl.as_secs(),
            Err(e) => {
                debug!(operation = "TTL", key = %full, error = %e, "Cache read failed");
                self.bump("misses", 1).await;
                -1
            }
        }
    }
}

// Statistics
impl CacheStore {
    /// Counters of this namespace
    ///
    /// Read from the backend hash so that every instance sees the same
    /// numbers; falls back to the in-process mirror when the backend is
    /// unreachable or holds no counters. Deltas counted during an outage
    /// are merged into the hash first.
    pub async fn get_stats(&self) -> CacheStats {
        self.flush_stats().await;
        let stats_key = self.stats_key();
        let key = stats_key.as_str();
        match self
            .call("HGETALL", move |backend| async move { backend.hget_all(key).await })
            .await
        {
            Ok(fields) if !fields.is_empty() => CacheStats::from_hash(&fields),
            Ok(_) => self.counters.snapshot(),
            Err(e) => {
                debug!(namespace = %self.namespace(), error = %e, "Falling back to local cache stats");
                self.counters.snapshot()
            }
        }
    }

    /// Zero the counters of this namespace
    pub async fn reset_stats(&self) -> Result<()> {
        self.counters.reset();
        let stats_key = [self.stats_key()];
        let keys = stats_key.as_slice();
        match self
            .call("DEL", move |backend| async move { backend.delete(keys).await })
            .await
        {
            Ok(_) | Err(Error::BackendUnavailable { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Best-effort counter update; failures never reach the caller
    async fn bump(&self, field: &'static str, delta: u64) {
        if delta == 0 {
            return;
        }
        self.counters.add(field, delta);
        self.flush_stats().await;
    }

    /// Push unflushed deltas to the backend hash
    ///
    /// A delta the backend rejects stays pending for the next attempt.
    async fn flush_stats(&self) {
        if self.breaker.is_disabled() {
            return;
        }
        let stats_key = self.stats_key();
        for field in STAT_FIELDS {
            let Some(pending) = self.counters.unflushed.counter(field) else {
                continue;
            };
            let delta = pending.swap(0, Ordering::Relaxed);
            if delta == 0 {
                continue;
            }
            if let Err(e) = self
                .backend
                .hincr_by(&stats_key, field, delta as i64)
                .await
            {
                pending.fetch_add(delta, Ordering::Relaxed);
                debug!(namespace = %self.namespace(), field = field, error = %e, "Stat update failed");
                return;
            }
        }
    }
}
