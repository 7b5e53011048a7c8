//! Configuration
//!
//! Typed configuration sections and the layered loader
//! (defaults, then TOML file, then `FLOWCACHE__*` environment variables).

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
