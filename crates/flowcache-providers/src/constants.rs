//! Provider-specific constants

/// Default Redis connection URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// `COUNT` hint passed to each Redis `SCAN` iteration
pub const REDIS_SCAN_COUNT: usize = 500;

/// Message returned by the in-memory backend while failure injection is on
pub const UNAVAILABLE_MESSAGE: &str = "backend unavailable";

/// Message returned when a primitive hits a key holding another type
pub const WRONG_TYPE_MESSAGE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";
