//! # Flowcache - Backend Implementations
//!
//! Concrete stores behind the [`CacheBackend`] port defined in
//! `flowcache-domain`, plus the clocks used to stamp and expire data.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Backend | `CacheBackend` | InMemory, Redis, Null |
//! | Clock | `Clock` | System, Manual |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! flowcache-providers = { version = "0.1", default-features = false }
//! ```
//!
//! Without `backend-redis` only the in-process backends are compiled.

// Re-export domain types commonly used with providers
pub use flowcache_domain::error::{Error, Result};
pub use flowcache_domain::ports::{CacheBackend, Clock, KeyTtl};

/// Provider-specific constants
pub mod constants;

/// Key-value backend implementations
///
/// Implements the `CacheBackend` trait for in-process and networked stores.
pub mod backend;

/// Clock implementations
pub mod clock;

/// Glob pattern matching shared by the in-process backend
pub mod glob;

pub use backend::{InMemoryBackend, NullBackend};
#[cfg(feature = "backend-redis")]
pub use backend::RedisBackend;
pub use clock::{ManualClock, SystemClock};
