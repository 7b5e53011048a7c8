//! Cache layer
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Namespaced key construction and the canonical-JSON key strategy |
//! | [`store`] | Typed cache store with stats and degrade mode |
//! | [`method`] | `cacheable` / `cache_evict` / `cache_put` wrapper combinators |
//! | [`factory`] | Backend selection from configuration |
//! | [`retry`] | Bounded retry with capped backoff |
//! | [`breaker`] | Consecutive-failure breaker driving degrade mode |

pub mod breaker;
pub mod factory;
pub mod key;
pub mod method;
pub mod retry;
pub mod store;

pub use breaker::DegradeBreaker;
pub use factory::BackendFactory;
pub use key::{CanonicalJsonKeys, KeyBuilder, canonical_json};
pub use method::{CacheOptions, EvictionPatterns, cache_evict, cache_put, cacheable};
pub use retry::RetryPolicy;
pub use store::CacheStore;
