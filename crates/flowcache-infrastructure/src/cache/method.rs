//! Method cache wrappers
//!
//! Higher-order combinators that wrap an async function with caching:
//!
//! - [`cacheable`]: fill on miss, serve hits without calling the function
//! - [`cache_evict`]: call the function, then evict patterns on success only
//! - [`cache_put`]: always call the function, then store its result
//!
//! The wrapped function's own result is always what the caller observes.
//! Cache failures (backend errors, key or value encoding errors) are logged
//! with the operation and key, then ignored.
//!
//! ## Example
//!
//! ```ignore
//! let get_workflow = cacheable(
//!     store.clone(),
//!     move |id: String| {
//!         let repo = repo.clone();
//!         async move { repo.find(&id).await }
//!     },
//!     CacheOptions::new("workflows"),
//! );
//!
//! let workflow = get_workflow("wf-1".to_string()).await?;
//! ```

use super::key::{CanonicalJsonKeys, KeyBuilder};
use super::store::CacheStore;
use flowcache_domain::constants::DEFAULT_API_TTL_SECS;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::KeyStrategy;
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Options of [`cacheable`] and [`cache_put`]
#[derive(Clone)]
pub struct CacheOptions {
    prefix: String,
    ttl: Duration,
    key_strategy: Arc<dyn KeyStrategy>,
}

impl CacheOptions {
    /// Options keyed under `prefix` with the default TTL and canonical JSON keys
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
            ttl: Duration::from_secs(DEFAULT_API_TTL_SECS),
            key_strategy: Arc::new(CanonicalJsonKeys),
        }
    }

    /// Override the TTL of stored results
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override how arguments become the key discriminator
    #[must_use]
    pub fn with_key_strategy<K: KeyStrategy + 'static>(mut self, strategy: K) -> Self {
        self.key_strategy = Arc::new(strategy);
        self
    }

    /// Prefix identifying the wrapped method
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// TTL of stored results
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Relative key (`prefix:discriminator`) for a call
    pub fn key_for<A: Serialize + ?Sized>(&self, args: &A) -> Result<String> {
        let value = serde_json::to_value(args)
            .map_err(|e| Error::serialization("Failed to encode cache key arguments", e))?;
        let discriminator = self.key_strategy.build_key(&value)?;
        Ok(KeyBuilder::join(&self.prefix, &discriminator))
    }
}

impl fmt::Debug for CacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Patterns evicted by [`cache_evict`] after a successful call
pub enum EvictionPatterns<A, R> {
    /// Always the same patterns
    Static(Vec<String>),
    /// Patterns derived from the result and the arguments
    Computed(Arc<dyn Fn(&R, &A) -> Vec<String> + Send + Sync>),
}

impl<A, R> EvictionPatterns<A, R> {
    /// Fixed pattern list
    pub fn fixed<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Static(patterns.into_iter().map(Into::into).collect())
    }

    /// Patterns computed per call
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&R, &A) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    fn resolve(&self, result: &R, args: &A) -> Vec<String> {
        match self {
            Self::Static(patterns) => patterns.clone(),
            Self::Computed(f) => f(result, args),
        }
    }
}

impl<A, R> Clone for EvictionPatterns<A, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(patterns) => Self::Static(patterns.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

fn log_cache_failure(operation: &str, key: &str, error: &Error) {
    warn!(operation = operation, key = key, error = %error, "Cache operation failed, ignoring");
}

/// Wrap `f` with fill-on-miss caching
///
/// Hits return the cached value without calling `f`. Misses call `f` and
/// store an `Ok` result under `options.ttl()`. Errors are never cached.
pub fn cacheable<A, R, E, F, Fut>(
    store: CacheStore,
    f: F,
    options: CacheOptions,
) -> impl Fn(A) -> BoxFuture<'static, std::result::Result<R, E>> + Clone + Send + Sync
where
    A: Serialize + Send + 'static,
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    E: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    let f = Arc::new(f);
    move |args: A| {
        let store = store.clone();
        let options = options.clone();
        let f = Arc::clone(&f);
        Box::pin(async move {
            let key = match options.key_for(&args) {
                Ok(key) => Some(key),
                Err(e) => {
                    log_cache_failure("cacheable", options.prefix(), &e);
                    None
                }
            };

            if let Some(key) = &key
                && let Some(hit) = store.get::<R>(key).await
            {
                return Ok(hit);
            }

            let result = f(args).await;
            if let (Ok(value), Some(key)) = (&result, &key)
                && let Err(e) = store.set(key, value, Some(options.ttl())).await
            {
                log_cache_failure("cacheable", key, &e);
            }
            result
        })
    }
}

/// Wrap `f` with eviction on success
///
/// `f` runs first; only an `Ok` result triggers `delete_pattern` for every
/// pattern. Patterns are relative to the store namespace.
pub fn cache_evict<A, R, E, F, Fut>(
    store: CacheStore,
    f: F,
    patterns: EvictionPatterns<A, R>,
) -> impl Fn(A) -> BoxFuture<'static, std::result::Result<R, E>> + Clone + Send + Sync
where
    A: Clone + Send + Sync + 'static,
    R: Send + Sync + 'static,
    E: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    let f = Arc::new(f);
    move |args: A| {
        let store = store.clone();
        let patterns = patterns.clone();
        let f = Arc::clone(&f);
        Box::pin(async move {
            let result = f(args.clone()).await;
            if let Ok(value) = &result {
                for pattern in patterns.resolve(value, &args) {
                    if let Err(e) = store.delete_pattern(&pattern).await {
                        log_cache_failure("cache_evict", &pattern, &e);
                    }
                }
            }
            result
        })
    }
}

/// Wrap `f` with refresh-on-write caching
///
/// `f` always runs; an `Ok` result is stored under the key built from the
/// arguments.
pub fn cache_put<A, R, E, F, Fut>(
    store: CacheStore,
    f: F,
    options: CacheOptions,
) -> impl Fn(A) -> BoxFuture<'static, std::result::Result<R, E>> + Clone + Send + Sync
where
    A: Serialize + Send + 'static,
    R: Serialize + Send + Sync + 'static,
    E: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
{
    let f = Arc::new(f);
    move |args: A| {
        let store = store.clone();
        let options = options.clone();
        let f = Arc::clone(&f);
        Box::pin(async move {
            let key = options.key_for(&args);
            let result = f(args).await;
            if let Ok(value) = &result {
                match &key {
                    Ok(key) => {
                        if let Err(e) = store.set(key, value, Some(options.ttl())).await {
                            log_cache_failure("cache_put", key, &e);
                        }
                    }
                    Err(e) => log_cache_failure("cache_put", options.prefix(), e),
                }
            }
            result
        })
    }
}
