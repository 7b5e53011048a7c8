//! Execution result cache
//!
//! Records live under `execution:{id}` with a TTL chosen from their status.
//! Two sorted recency indices point at them:
//!
//! - `executions:recent` (every workflow)
//! - `executions:workflow:{workflow_id}:recent`
//!
//! Index members are execution ids scored by insertion time (epoch ms).
//! Each write trims an index to the newest `recent_limit` ids and refreshes
//! its TTL, which is shorter than any record TTL: the index is a recency
//! hint, so it may point at records that already expired. Readers skip
//! those silently.
//!
//! Nothing here is transactional. `update_status` is a read-modify-write
//! and relies on a single writer per execution id.

use super::ttl::TtlPolicy;
use crate::cache::CacheStore;
use crate::config::ExecutionConfig;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::Clock;
use flowcache_domain::value_objects::{ExecutionRecord, ExecutionStatus};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const RECORD_PREFIX: &str = "execution";
const RECENT_INDEX: &str = "executions:recent";

fn record_key(id: &str) -> String {
    format!("{RECORD_PREFIX}:{id}")
}

fn workflow_index(workflow_id: &str) -> String {
    format!("executions:workflow:{workflow_id}:recent")
}

/// Status-aware execution cache
#[derive(Debug, Clone)]
pub struct ExecutionResultCache {
    store: CacheStore,
    ttl: TtlPolicy,
    recent_limit: usize,
    recent_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ExecutionResultCache {
    /// Create a cache with the default TTL table and index limits
    pub fn new(store: CacheStore, clock: Arc<dyn Clock>) -> Self {
        Self::from_config(store, &ExecutionConfig::default(), clock)
    }

    /// Create a cache from the execution section
    pub fn from_config(store: CacheStore, config: &ExecutionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ttl: TtlPolicy::from_config(config),
            recent_limit: config.recent_limit.max(1),
            recent_ttl: Duration::from_secs(config.recent_ttl_secs),
            clock,
        }
    }

    /// TTL table in use
    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl
    }

    /// Store a record and push its id onto both recency indices
    ///
    /// The TTL comes from the record status unless `ttl_override` is set.
    /// Only encoding failures are returned; backend failures on the record
    /// or its indices are logged and ignored.
    pub async fn set(
        &self,
        id: &str,
        record: &ExecutionRecord,
        ttl_override: Option<Duration>,
    ) -> Result<()> {
        let ttl = ttl_override.unwrap_or_else(|| self.ttl.for_status(record.status));
        let key = record_key(id);
        if let Err(e) = self.store.set(&key, record, Some(ttl)).await {
            if e.is_serialization() {
                return Err(e);
            }
            warn!(operation = "SET", key = %key, error = %e, "Failed to cache execution record");
        }

        let score = self.clock.now_millis() as f64;
        for index in [RECENT_INDEX.to_string(), workflow_index(&record.workflow_id)] {
            if let Err(e) = self.push_index(&index, id, score).await {
                if matches!(e, Error::BackendUnavailable { .. }) {
                    debug!(index = %index, execution_id = id, "Recency index skipped while cache is disabled");
                } else {
                    warn!(index = %index, execution_id = id, error = %e, "Failed to update recency index");
                }
            }
        }
        Ok(())
    }

    async fn push_index(&self, relative: &str, id: &str, score: f64) -> Result<()> {
        let key = self.store.key(relative);
        let key = key.as_str();
        let keep_from = -(self.recent_limit as isize) - 1;
        let ttl = self.recent_ttl;

        self.store
            .call("ZADD", move |backend| async move {
                backend.zadd(key, score, id).await
            })
            .await?;
        self.store
            .call("ZREMRANGEBYRANK", move |backend| async move {
                backend.zrem_range_by_rank(key, 0, keep_from).await
            })
            .await?;
        self.store
            .call("EXPIRE", move |backend| async move {
                backend.expire(key, ttl).await
            })
            .await?;
        Ok(())
    }

    /// Cached record of an execution
    pub async fn get(&self, id: &str) -> Option<ExecutionRecord> {
        self.store.get(&record_key(id)).await
    }

    /// Newest records across every workflow, most recent first
    pub async fn get_recent(&self, limit: usize) -> Vec<ExecutionRecord> {
        self.read_index(RECENT_INDEX, limit).await
    }

    /// Newest records of one workflow, most recent first
    ///
    /// Ids whose record expired are skipped, so fewer than `limit` records
    /// may come back.
    pub async fn get_by_workflow(&self, workflow_id: &str, limit: usize) -> Vec<ExecutionRecord> {
        self.read_index(&workflow_index(workflow_id), limit).await
    }

    async fn read_index(&self, relative: &str, limit: usize) -> Vec<ExecutionRecord> {
        let ids = match self.index_ids(relative, limit).await {
            Ok(ids) => ids,
            Err(e) => {
                debug!(index = relative, error = %e, "Recency index read failed");
                return Vec::new();
            }
        };
        join_all(ids.iter().map(|id| self.get(id)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Up to `limit` ids of an index, newest first
    async fn index_ids(&self, relative: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let key = self.store.key(relative);
        let key = key.as_str();
        let stop = isize::try_from(limit - 1).unwrap_or(isize::MAX);
        self.store
            .call("ZRANGE", move |backend| async move {
                backend.zrange(key, 0, stop, true).await
            })
            .await
    }

    /// Move an execution to `status` and store it again
    ///
    /// Entering `success` or `error` stamps `stopped_at` and `duration`.
    /// The TTL is recomputed from the new status. Returns `None` when no
    /// record is cached for `id`.
    pub async fn update_status(
        &self,
        id: &str,
        status: ExecutionStatus,
    ) -> Result<Option<ExecutionRecord>> {
        let Some(mut record) = self.get(id).await else {
            debug!(execution_id = id, "No cached execution to update");
            return Ok(None);
        };
        record.transition_to(status, self.clock.now());
        self.set(id, &record, None).await?;
        Ok(Some(record))
    }

    /// Delete every cached record and index
    pub async fn clear(&self) -> Result<u64> {
        let records = self.store.delete_pattern(&format!("{RECORD_PREFIX}:*")).await?;
        let indices = self.store.delete_pattern("executions:*").await?;
        Ok(records + indices)
    }

    /// Delete the records of one workflow and its index
    ///
    /// The global index may keep pointing at the deleted ids until they are
    /// trimmed or the index expires.
    pub async fn clear_by_workflow(&self, workflow_id: &str) -> Result<u64> {
        let index = workflow_index(workflow_id);
        let ids = match self.index_ids(&index, usize::MAX).await {
            Ok(ids) => ids,
            Err(Error::BackendUnavailable { .. }) => return Ok(0),
            Err(e) => return Err(e),
        };
        let mut keys: Vec<String> = ids.iter().map(|id| record_key(id)).collect();
        keys.push(index);
        self.store.delete_many(&keys).await
    }
}
