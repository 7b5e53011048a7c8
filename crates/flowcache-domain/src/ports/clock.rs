//! Clock Port
//!
//! Every component that stamps or expires data reads time through this
//! port, so tests can advance a manual clock instead of sleeping.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as milliseconds since the Unix epoch
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
