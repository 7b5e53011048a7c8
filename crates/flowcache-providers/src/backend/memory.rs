//! In-memory backend
//!
//! Process-local implementation of every [`CacheBackend`] primitive,
//! including per-key expiry, sorted collections, sets and counter hashes.
//! Expiry is evaluated lazily against the injected [`Clock`], so a
//! `ManualClock` makes TTL behaviour fully deterministic.
//!
//! Individual primitives are atomic per key; sequences of primitives are
//! not, matching what a networked store offers.

use crate::clock::SystemClock;
use crate::constants::{UNAVAILABLE_MESSAGE, WRONG_TYPE_MESSAGE};
use crate::glob::compile_pattern;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use flowcache_domain::error::{Error, Result};
use flowcache_domain::ports::{CacheBackend, Clock, KeyTtl};
use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Member of a sorted collection, ordered by score then member
#[derive(Debug, Clone)]
struct ScoredMember {
    score: f64,
    member: String,
}

impl PartialEq for ScoredMember {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for ScoredMember {}

impl PartialOrd for ScoredMember {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredMember {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.member.cmp(&other.member))
    }
}

#[derive(Debug, Clone, Default)]
struct SortedSet {
    scores: HashMap<String, f64>,
    ordered: BTreeSet<ScoredMember>,
}

impl SortedSet {
    fn insert(&mut self, score: f64, member: &str) {
        if let Some(previous) = self.scores.insert(member.to_owned(), score) {
            self.ordered.remove(&ScoredMember {
                score: previous,
                member: member.to_owned(),
            });
        }
        self.ordered.insert(ScoredMember {
            score,
            member: member.to_owned(),
        });
    }

    fn remove(&mut self, scored: &ScoredMember) {
        self.scores.remove(&scored.member);
        self.ordered.remove(scored);
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    fn range_by_rank(&self, start: isize, stop: isize, rev: bool) -> Vec<ScoredMember> {
        let Some((start, stop)) = rank_bounds(self.len(), start, stop) else {
            return Vec::new();
        };
        let take = stop - start + 1;
        if rev {
            self.ordered.iter().rev().skip(start).take(take).cloned().collect()
        } else {
            self.ordered.iter().skip(start).take(take).cloned().collect()
        }
    }

    fn range_by_score(&self, min: f64, max: f64) -> Vec<ScoredMember> {
        self.ordered
            .iter()
            .filter(|m| m.score >= min && m.score <= max)
            .cloned()
            .collect()
    }

    fn remove_all(&mut self, members: &[ScoredMember]) -> u64 {
        for scored in members {
            self.remove(scored);
        }
        members.len() as u64
    }
}

/// Normalize inclusive rank bounds the way Redis does
///
/// Negative ranks count from the end; out-of-range bounds are clamped.
fn rank_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[derive(Debug, Clone)]
enum StoredValue {
    String(String),
    SortedSet(SortedSet),
    Set(BTreeSet<String>),
    Hash(BTreeMap<String, i64>),
}

impl StoredValue {
    fn is_empty_collection(&self) -> bool {
        match self {
            Self::String(_) => false,
            Self::SortedSet(set) => set.len() == 0,
            Self::Set(set) => set.is_empty(),
            Self::Hash(hash) => hash.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredEntry {
    value: StoredValue,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn persistent(value: StoredValue) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

fn wrong_type(operation: &str) -> Error {
    Error::backend(operation, WRONG_TYPE_MESSAGE)
}

fn deadline(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    let delta = TimeDelta::from_std(ttl)
        .map_err(|e| Error::invalid_argument(format!("TTL out of range: {e}")))?;
    now.checked_add_signed(delta)
        .ok_or_else(|| Error::invalid_argument("TTL out of range"))
}

/// Process-local backend
///
/// Cloning shares the underlying map. [`set_available`](Self::set_available)
/// simulates an outage: while unavailable every primitive fails with
/// [`Error::Backend`].
///
/// # Example
///
/// ```
/// use flowcache_domain::ports::CacheBackend;
/// use flowcache_providers::InMemoryBackend;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let backend = InMemoryBackend::new();
/// backend.set("app:k", "\"v\"", None).await.unwrap();
/// assert_eq!(backend.get("app:k").await.unwrap().as_deref(), Some("\"v\""));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    entries: Arc<DashMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Create an empty backend reading wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create an empty backend reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle failure injection
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether primitives currently succeed
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Whether no live key remains
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, operation: &str) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::backend(operation, UNAVAILABLE_MESSAGE))
        }
    }

    fn purge_expired(&self, key: &str) {
        let now = self.clock.now();
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
    }

    fn drop_if_empty(&self, key: &str) {
        self.entries
            .remove_if(key, |_, entry| entry.value.is_empty_collection());
    }

    /// Run `read` against a live entry, `None` when the key is missing
    fn read<T>(&self, key: &str, read: impl FnOnce(&StoredEntry) -> Result<T>) -> Result<Option<T>> {
        self.purge_expired(key);
        match self.entries.get(key) {
            Some(entry) => read(&entry).map(Some),
            None => Ok(None),
        }
    }

    /// Run `write` against a live entry, creating it with `create` if missing
    fn write<T>(
        &self,
        key: &str,
        create: impl FnOnce() -> StoredValue,
        write: impl FnOnce(&mut StoredValue) -> Result<T>,
    ) -> Result<T> {
        self.purge_expired(key);
        let result = {
            let mut entry = self
                .entries
                .entry(key.to_owned())
                .or_insert_with(|| StoredEntry::persistent(create()));
            write(&mut entry.value)
        };
        self.drop_if_empty(key);
        result
    }

    fn write_sorted_set<T>(
        &self,
        operation: &str,
        key: &str,
        write: impl FnOnce(&mut SortedSet) -> T,
    ) -> Result<T> {
        self.write(
            key,
            || StoredValue::SortedSet(SortedSet::default()),
            |value| match value {
                StoredValue::SortedSet(set) => Ok(write(set)),
                _ => Err(wrong_type(operation)),
            },
        )
    }

    fn read_sorted_set<T: Default>(
        &self,
        operation: &str,
        key: &str,
        read: impl FnOnce(&SortedSet) -> T,
    ) -> Result<T> {
        self.read(key, |entry| match &entry.value {
            StoredValue::SortedSet(set) => Ok(read(set)),
            _ => Err(wrong_type(operation)),
        })
        .map(Option::unwrap_or_default)
    }
}

fn members(scored: Vec<ScoredMember>) -> Vec<String> {
    scored.into_iter().map(|m| m.member).collect()
}

#[async_trait]
impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check("GET")?;
        self.read(key, |entry| match &entry.value {
            StoredValue::String(value) => Ok(value.clone()),
            _ => Err(wrong_type("GET")),
        })
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.check("SET")?;
        let expires_at = match ttl {
            Some(ttl) => Some(deadline(self.clock.now(), ttl)?),
            None => None,
        };
        self.entries.insert(
            key.to_owned(),
            StoredEntry {
                value: StoredValue::String(value.to_owned()),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        self.check("DEL")?;
        let now = self.clock.now();
        let removed = keys
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .filter(|(_, entry)| !entry.is_expired(now))
            .count();
        Ok(removed as u64)
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        self.check("SCAN")?;
        let matcher = compile_pattern(pattern)?;
        let now = self.clock.now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| matcher.is_match(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.check("EXISTS")?;
        Ok(self.read(key, |_| Ok(()))?.is_some())
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        self.check("TTL")?;
        let now = self.clock.now();
        let ttl = self.read(key, |entry| {
            Ok(match entry.expires_at {
                Some(at) => KeyTtl::Expires((at - now).to_std().unwrap_or_default()),
                None => KeyTtl::Persistent,
            })
        })?;
        Ok(ttl.unwrap_or(KeyTtl::Missing))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.check("EXPIRE")?;
        let expires_at = deadline(self.clock.now(), ttl)?;
        self.purge_expired(key);
        Ok(match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = Some(expires_at);
                true
            }
            None => false,
        })
    }

    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<()> {
        self.check("ZADD")?;
        self.write_sorted_set("ZADD", key, |set| set.insert(score, member))
    }

    async fn zrange(
        &self,
        key: &str,
        start: isize,
        stop: isize,
        rev: bool,
    ) -> Result<Vec<String>> {
        self.check("ZRANGE")?;
        self.read_sorted_set("ZRANGE", key, |set| {
            members(set.range_by_rank(start, stop, rev))
        })
    }

    async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        self.check("ZRANGEBYSCORE")?;
        self.read_sorted_set("ZRANGEBYSCORE", key, |set| {
            members(set.range_by_score(min, max))
        })
    }

    async fn zrem_range_by_rank(&self, key: &str, start: isize, stop: isize) -> Result<u64> {
        self.check("ZREMRANGEBYRANK")?;
        self.write_sorted_set("ZREMRANGEBYRANK", key, |set| {
            let doomed = set.range_by_rank(start, stop, false);
            set.remove_all(&doomed)
        })
    }

    async fn zrem_range_by_score(&self, key: &str, min: f64, max: f64) -> Result<u64> {
        self.check("ZREMRANGEBYSCORE")?;
        self.write_sorted_set("ZREMRANGEBYSCORE", key, |set| {
            let doomed = set.range_by_score(min, max);
            set.remove_all(&doomed)
        })
    }

    async fn zcard(&self, key: &str) -> Result<u64> {
        self.check("ZCARD")?;
        self.read_sorted_set("ZCARD", key, |set| set.len() as u64)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        self.check("SADD")?;
        self.write(
            key,
            || StoredValue::Set(BTreeSet::new()),
            |value| match value {
                StoredValue::Set(set) => Ok(set.insert(member.to_owned())),
                _ => Err(wrong_type("SADD")),
            },
        )
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.check("SMEMBERS")?;
        let found = self.read(key, |entry| match &entry.value {
            StoredValue::Set(set) => Ok(set.iter().cloned().collect()),
            _ => Err(wrong_type("SMEMBERS")),
        })?;
        Ok(found.unwrap_or_default())
    }

    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        self.check("HINCRBY")?;
        self.write(
            key,
            || StoredValue::Hash(BTreeMap::new()),
            |value| match value {
                StoredValue::Hash(hash) => {
                    let counter = hash.entry(field.to_owned()).or_insert(0);
                    *counter = counter
                        .checked_add(delta)
                        .ok_or_else(|| Error::backend("HINCRBY", "increment would overflow"))?;
                    Ok(*counter)
                }
                _ => Err(wrong_type("HINCRBY")),
            },
        )
    }

    async fn hget_all(&self, key: &str) -> Result<HashMap<String, i64>> {
        self.check("HGETALL")?;
        let found = self.read(key, |entry| match &entry.value {
            StoredValue::Hash(hash) => Ok(hash
                .iter()
                .map(|(field, value)| (field.clone(), *value))
                .collect()),
            _ => Err(wrong_type("HGETALL")),
        })?;
        Ok(found.unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        self.check("PING")
    }

    async fn flush(&self) -> Result<()> {
        self.check("FLUSHDB")?;
        self.entries.clear();
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
