//! Execution result cache
//!
//! Status-aware caching of workflow execution records with bounded,
//! time-ordered recency indices (global and per workflow).

pub mod cache;
pub mod ttl;

pub use cache::ExecutionResultCache;
pub use ttl::TtlPolicy;
