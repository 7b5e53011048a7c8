//! Runtime Lifecycle Tests

mod runtime_test;
