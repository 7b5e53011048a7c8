//! Execution Result Cache Tests
