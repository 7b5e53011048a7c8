//! # Flowcache Domain Layer
//!
//! Core types and port contracts for the caching and telemetry core of a
//! workflow-automation backend.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and result alias |
//! | [`constants`] | Default TTLs, limits and retention windows |
//! | [`ports`] | Backend, clock and key-strategy contracts |
//! | [`value_objects`] | Execution records, metric events, stats and reports |
//!
//! Everything modelled here is ephemeral derived state: dropping it loses
//! no authoritative data, only cache warmth and observability history.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CacheBackend, Clock, KeyStrategy, KeyTtl};
pub use value_objects::*;
