//! Redis backend
//!
//! Distributed implementation shared by every instance of the service.
//! Uses a [`ConnectionManager`], which multiplexes commands over one
//! connection and reconnects transparently after a drop.
//!
//! ## Example
//!
//! ```ignore
//! use flowcache_providers::RedisBackend;
//!
//! let backend = RedisBackend::connect("redis://localhost:6379").await?;
//! ```

use crate::constants::REDIS_SCAN_COUNT;
use async_trait::async_trait;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::{CacheBackend, KeyTtl};
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Redis backend
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
    url: String,
}

impl RedisBackend {
    /// Connect to a Redis server
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| Error::Configuration {
            message: format!("Invalid Redis URL: {e}"),
            source: Some(Box::new(e)),
        })?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::backend_with_source("CONNECT", e))?;

        debug!(url = %redact(url), "Connected to Redis");
        Ok(Self {
            manager,
            url: url.to_owned(),
        })
    }

    async fn query<T: FromRedisValue>(&self, operation: &'static str, cmd: &Cmd) -> Result<T> {
        let mut conn = self.manager.clone();
        cmd.query_async(&mut conn)
            .await
            .map_err(|e| Error::backend_with_source(operation, e))
    }
}

/// Strip credentials from a connection URL before it reaches a log line
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_owned(),
    }
}

fn millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.query("GET", redis::cmd("GET").arg(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("PX").arg(millis(ttl));
        }
        self.query("SET", &cmd).await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        self.query("DEL", redis::cmd("DEL").arg(keys)).await
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = self
                .query(
                    "SCAN",
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(pattern)
                        .arg("COUNT")
                        .arg(REDIS_SCAN_COUNT),
                )
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let count: u64 = self.query("EXISTS", redis::cmd("EXISTS").arg(key)).await?;
        Ok(count > 0)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let remaining: i64 = self.query("PTTL", redis::cmd("PTTL").arg(key)).await?;
        Ok(match remaining {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::Persistent,
            ms => KeyTtl::Expires(Duration::from_millis(ms.max(0) as u64)),
        })
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let applied: i64 = self
            .query("PEXPIRE", redis::cmd("PEXPIRE").arg(key).arg(millis(ttl)))
            .await?;
        Ok(applied == 1)
    }

    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<()> {
        let _: i64 = self
            .query("ZADD", redis::cmd("ZADD").arg(key).arg(score).arg(member))
            .await?;
        Ok(())
    }

    async fn zrange(
        &self,
        key: &str,
        start: isize,
        stop: isize,
        rev: bool,
    ) -> Result<Vec<String>> {
        let name = if rev { "ZREVRANGE" } else { "ZRANGE" };
        self.query(name, redis::cmd(name).arg(key).arg(start).arg(stop))
            .await
    }

    async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        self.query(
            "ZRANGEBYSCORE",
            redis::cmd("ZRANGEBYSCORE").arg(key).arg(min).arg(max),
        )
        .await
    }

    async fn zrem_range_by_rank(&self, key: &str, start: isize, stop: isize) -> Result<u64> {
        self.query(
            "ZREMRANGEBYRANK",
            redis::cmd("ZREMRANGEBYRANK").arg(key).arg(start).arg(stop),
        )
        .await
    }

    async fn zrem_range_by_score(&self, key: &str, min: f64, max: f64) -> Result<u64> {
        self.query(
            "ZREMRANGEBYSCORE",
            redis::cmd("ZREMRANGEBYSCORE").arg(key).arg(min).arg(max),
        )
        .await
    }

    async fn zcard(&self, key: &str) -> Result<u64> {
        self.query("ZCARD", redis::cmd("ZCARD").arg(key)).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let added: i64 = self
            .query("SADD", redis::cmd("SADD").arg(key).arg(member))
            .await?;
        Ok(added == 1)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let mut members: Vec<String> =
            self.query("SMEMBERS", redis::cmd("SMEMBERS").arg(key)).await?;
        members.sort();
        Ok(members)
    }

    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        self.query(
            "HINCRBY",
            redis::cmd("HINCRBY").arg(key).arg(field).arg(delta),
        )
        .await
    }

    async fn hget_all(&self, key: &str) -> Result<HashMap<String, i64>> {
        self.query("HGETALL", redis::cmd("HGETALL").arg(key)).await
    }

    async fn ping(&self) -> Result<()> {
        let _: String = self.query("PING", &redis::cmd("PING")).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.query("FLUSHDB", &redis::cmd("FLUSHDB")).await
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("url", &redact(&self.url))
            .finish_non_exhaustive()
    }
}
