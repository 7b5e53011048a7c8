//! Domain Port Interfaces
//!
//! Contracts implemented by the provider and infrastructure layers.
//!
//! - **backend** - key-value store primitives required by the cache core
//! - **clock** - time source, injectable so expiry can be simulated
//! - **key_strategy** - pluggable cache key generation for method wrappers

/// Key-value backend port
pub mod backend;
/// Time source port
pub mod clock;
/// Cache key strategy port
pub mod key_strategy;

pub use backend::{CacheBackend, KeyTtl};
pub use clock::Clock;
pub use key_strategy::KeyStrategy;
