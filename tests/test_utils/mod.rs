//! Test Utilities and Mocks
//!
//! Shared helpers for the TysonTerm test suites. Each suite pulls this in
//! with `#[path = "../test_utils/mod.rs"] mod test_utils;`, so not every
//! helper is used everywhere.

#![allow(dead_code, unused_imports)]

pub mod fixtures;

// Re-exports for convenience
pub use fixtures::{create_test_config, interactive_view, RecordingSink, ViewSink};
pub use mock_interpreter::{MockInterpreter, MockSession};
