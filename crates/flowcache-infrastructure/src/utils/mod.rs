//! Infrastructure utilities
//!
//! Timing helper used by the metrics recorder.

mod timing;

pub use timing::TimedOperation;
