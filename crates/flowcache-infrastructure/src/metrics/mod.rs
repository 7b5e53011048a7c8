//! Metrics
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`recorder`] | Appends metric events to retention-bounded series |
//! | [`report`] | Historical and real-time performance reports |
//! | [`stats`] | Pure summary statistics shared by both report views |

pub mod recorder;
pub mod report;
pub mod stats;

pub use recorder::MetricsRecorder;
pub use report::ReportGenerator;
