//! Cache configuration types

use flowcache_domain::constants::{DEFAULT_API_TTL_SECS, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheProviderKind {
    /// Process-local backend
    #[default]
    Memory,
    /// Redis server
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled; when off every read misses and writes are dropped
    pub enabled: bool,

    /// Cache backend
    pub provider: CacheProviderKind,

    /// Redis URL (for Redis provider)
    pub redis_url: Option<String>,

    /// Namespace prefixed to every key
    pub namespace: String,

    /// TTL applied when a write does not name one
    pub default_ttl_secs: u64,
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: CacheProviderKind::Memory,
            redis_url: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_ttl_secs: DEFAULT_API_TTL_SECS,
        }
    }
}
