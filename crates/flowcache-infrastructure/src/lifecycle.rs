//! Cache runtime lifecycle
//!
//! [`CacheRuntime`] owns one backend and every component built on it:
//! the namespaced cache store, the execution cache, the metrics recorder
//! and the report generator. It is created once at startup, shared by
//! `Arc`, and stopped with [`shutdown`](CacheRuntime::shutdown).
//!
//! While running, a background task probes the backend on a fixed interval
//! whenever the store is in degrade mode, and re-enables it after the
//! first successful ping.
//!
//! ## Usage
//!
//! ```ignore
//! use flowcache_infrastructure::config::ConfigLoader;
//! use flowcache_infrastructure::lifecycle::CacheRuntime;
//!
//! let config = ConfigLoader::new().load()?;
//! let runtime = CacheRuntime::init(config).await?;
//!
//! runtime.executions().set("exec-1", &record, None).await?;
//! let report = runtime.reports().get_real_time_stats().await?;
//!
//! runtime.shutdown().await;
//! ```

use crate::cache::{BackendFactory, CacheStore};
use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::execution::ExecutionResultCache;
use crate::metrics::{MetricsRecorder, ReportGenerator};
use flowcache_domain::error::Result;
use flowcache_domain::ports::{CacheBackend, Clock};
use flowcache_providers::SystemClock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Running cache and telemetry components
#[derive(Debug)]
pub struct CacheRuntime {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    store: CacheStore,
    executions: ExecutionResultCache,
    metrics: MetricsRecorder,
    reports: ReportGenerator,
    shutdown: CancellationToken,
    probe_task: Mutex<Option<JoinHandle<()>>>,
}

impl CacheRuntime {
    /// Build the runtime from configuration with the system clock
    ///
    /// The backend is chosen by [`BackendFactory`]; an unreachable Redis
    /// server falls back to the null backend instead of failing startup.
    pub async fn init(config: AppConfig) -> Result<Arc<Self>> {
        validate_app_config(&config)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let backend = BackendFactory::create_from_config(&config.cache, Arc::clone(&clock)).await?;
        Self::init_with_backend(config, backend, clock).await
    }

    /// Build the runtime around an existing backend and clock
    pub async fn init_with_backend(
        config: AppConfig,
        backend: Arc<dyn CacheBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Arc<Self>> {
        validate_app_config(&config)?;

        let store = CacheStore::from_config(backend, &config);
        let executions =
            ExecutionResultCache::from_config(store.clone(), &config.execution, Arc::clone(&clock));
        let metrics = MetricsRecorder::from_config(store.clone(), &config.metrics, Arc::clone(&clock));
        let reports = ReportGenerator::from_config(metrics.clone(), &config.metrics);

        let shutdown = CancellationToken::new();
        let probe_task = spawn_probe(
            store.clone(),
            Duration::from_secs(config.resilience.probe_interval_secs),
            shutdown.clone(),
        );

        info!(
            provider = store.backend().provider_name(),
            namespace = store.namespace(),
            "Cache runtime started"
        );

        Ok(Arc::new(Self {
            config,
            clock,
            store,
            executions,
            metrics,
            reports,
            shutdown,
            probe_task: Mutex::new(Some(probe_task)),
        }))
    }

    /// Stop the health probe and wait for it to exit
    ///
    /// Idempotent. Components stay usable afterwards, but a degraded store
    /// is no longer re-enabled automatically.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handle = self
            .probe_task
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Health probe task ended abnormally");
            }
            info!("Cache runtime stopped");
        }
    }

    /// Whether [`shutdown`](Self::shutdown) has been called
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Cache store of the configured namespace
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Execution result cache
    pub fn executions(&self) -> &ExecutionResultCache {
        &self.executions
    }

    /// Metrics recorder
    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Report generator
    pub fn reports(&self) -> &ReportGenerator {
        &self.reports
    }

    /// Configuration the runtime was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Clock shared by every component
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl Drop for CacheRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn spawn_probe(store: CacheStore, every: Duration, shutdown: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if store.is_disabled() {
                        debug!(namespace = store.namespace(), "Probing degraded cache backend");
                        store.probe().await;
                    }
                }
            }
        }
    })
}
