//! Cache Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`NullBackend`] | Disabled | Stores nothing; every read misses |
//! | [`InMemoryBackend`] | Local | Process-local map with expiry and collections |
//! | [`RedisBackend`] | Distributed | Redis server shared by every instance |
//!
//! ## Backend Selection Guide
//!
//! - **Tests / single process**: `InMemoryBackend` with a `ManualClock`
//! - **Multi instance**: `RedisBackend`
//! - **Caching switched off**: `NullBackend`

pub mod memory;
pub mod null;
#[cfg(feature = "backend-redis")]
pub mod redis;

pub use memory::InMemoryBackend;
pub use null::NullBackend;
#[cfg(feature = "backend-redis")]
pub use redis::RedisBackend;
