//! Test utilities for flowcache-infrastructure integration tests
//!
//! Stores are built on the real in-memory backend with a manual clock, so
//! expiry is driven by advancing time instead of sleeping.

pub mod recording_backend;

pub use recording_backend::RecordingBackend;

use chrono::{TimeZone, Utc};
use flowcache_domain::ports::Clock;
use flowcache_infrastructure::cache::{CacheStore, RetryPolicy};
use flowcache_providers::{InMemoryBackend, ManualClock};
use std::sync::Arc;

/// Manual clock fixed at 2024-05-01 12:00:00 UTC
pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ))
}

/// In-memory store without retries, plus handles on its backend and clock
pub fn memory_store(namespace: &str) -> (CacheStore, InMemoryBackend, Arc<ManualClock>) {
    let clock = test_clock();
    let backend = InMemoryBackend::with_clock(clock.clone() as Arc<dyn Clock>);
    let store =
        CacheStore::new(Arc::new(backend.clone()), namespace).with_retry(RetryPolicy::none());
    (store, backend, clock)
}
