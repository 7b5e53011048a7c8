//! Metrics Tests

mod recorder_test;
