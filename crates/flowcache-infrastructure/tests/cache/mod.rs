//! Cache Layer Tests
//!
//! Store semantics, degrade mode, method wrappers and backend selection.

mod degrade_test;
mod factory_test;
mod method_test;
mod store_test;
