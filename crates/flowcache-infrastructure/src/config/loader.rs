//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values, merged with Figment.

use crate::config::{AppConfig, CacheProviderKind};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use flowcache_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `FLOWCACHE__CACHE__NAMESPACE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys (FLOWCACHE__CACHE__REDIS_URL)
        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| Error::configuration(format!("Failed to extract configuration: {e}")))?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_cache_config(config)?;
    validate_execution_config(config)?;
    validate_metrics_config(config)?;
    validate_resilience_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    let cache = &config.cache;
    if cache.namespace.is_empty() {
        return Err(Error::configuration("Cache namespace cannot be empty"));
    }
    if cache.enabled && cache.default_ttl_secs == 0 {
        return Err(Error::configuration(
            "Cache TTL cannot be 0 when cache is enabled",
        ));
    }
    if cache.enabled
        && cache.provider == CacheProviderKind::Redis
        && cache.redis_url.as_deref().is_none_or(str::is_empty)
    {
        return Err(Error::configuration(
            "Redis URL is required when the Redis provider is selected",
        ));
    }
    Ok(())
}

fn validate_execution_config(config: &AppConfig) -> Result<()> {
    let execution = &config.execution;
    if execution.ttl_success_secs == 0
        || execution.ttl_error_secs == 0
        || execution.ttl_running_secs == 0
    {
        return Err(Error::configuration("Execution TTLs cannot be 0"));
    }
    if execution.recent_limit == 0 {
        return Err(Error::configuration("Recent execution limit cannot be 0"));
    }
    if execution.recent_ttl_secs == 0 {
        return Err(Error::configuration("Recent index TTL cannot be 0"));
    }
    Ok(())
}

fn validate_metrics_config(config: &AppConfig) -> Result<()> {
    let metrics = &config.metrics;
    if metrics.retention_days == 0 {
        return Err(Error::configuration("Metric retention cannot be 0 days"));
    }
    if metrics.real_time_window_secs == 0 {
        return Err(Error::configuration("Real-time window cannot be 0"));
    }
    if metrics.top_n == 0 {
        return Err(Error::configuration("Report top-N cannot be 0"));
    }
    Ok(())
}

fn validate_resilience_config(config: &AppConfig) -> Result<()> {
    let resilience = &config.resilience;
    if resilience.failure_threshold == 0 {
        return Err(Error::configuration("Failure threshold cannot be 0"));
    }
    if resilience.probe_interval_secs == 0 {
        return Err(Error::configuration("Probe interval cannot be 0"));
    }
    if resilience.retry_initial_delay_ms > resilience.retry_max_delay_ms {
        return Err(Error::configuration(
            "Initial retry delay cannot exceed the maximum retry delay",
        ));
    }
    Ok(())
}
