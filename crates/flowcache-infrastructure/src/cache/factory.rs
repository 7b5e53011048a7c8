//! Backend factory
//!
//! Picks the [`CacheBackend`] implementation named by the configuration.
//! A Redis server that cannot be reached at start-up is not fatal: the
//! factory logs a warning and falls back to the null backend, since the
//! cache is an optimization and never the system of record.

use crate::config::{CacheConfig, CacheProviderKind};
use flowcache_domain::error::Result;
use flowcache_domain::ports::{CacheBackend, Clock};
use flowcache_providers::{InMemoryBackend, NullBackend};
use std::sync::Arc;
use tracing::{info, warn};

/// Backend factory
pub struct BackendFactory;

impl BackendFactory {
    /// Create the backend described by `config`
    pub async fn create_from_config(
        config: &CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Arc<dyn CacheBackend>> {
        if !config.enabled {
            info!("Cache disabled by configuration, using null backend");
            return Ok(Self::create_null());
        }

        match config.provider {
            CacheProviderKind::Memory => Ok(Self::create_memory(clock)),
            CacheProviderKind::Redis => {
                let url = config
                    .redis_url
                    .clone()
                    .unwrap_or_else(|| crate::constants::REDIS_DEFAULT_URL.to_string());
                match Self::create_redis(&url).await {
                    Ok(backend) => Ok(backend),
                    Err(e) => {
                        warn!(error = %e, "Redis unavailable at start-up, caching disabled");
                        Ok(Self::create_null())
                    }
                }
            }
        }
    }

    /// Create a null backend
    pub fn create_null() -> Arc<dyn CacheBackend> {
        Arc::new(NullBackend::new())
    }

    /// Create an in-memory backend reading time from `clock`
    pub fn create_memory(clock: Arc<dyn Clock>) -> Arc<dyn CacheBackend> {
        Arc::new(InMemoryBackend::with_clock(clock))
    }

    /// Connect to Redis
    #[cfg(feature = "backend-redis")]
    pub async fn create_redis(url: &str) -> Result<Arc<dyn CacheBackend>> {
        let backend = flowcache_providers::RedisBackend::connect(url).await?;
        Ok(Arc::new(backend))
    }

    /// Redis support was compiled out
    #[cfg(not(feature = "backend-redis"))]
    pub async fn create_redis(_url: &str) -> Result<Arc<dyn CacheBackend>> {
        Err(flowcache_domain::error::Error::configuration(
            "Redis backend requires the `backend-redis` feature",
        ))
    }
}
