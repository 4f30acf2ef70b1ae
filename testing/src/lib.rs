//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Log capture for tests via [`init_test_tracing`]
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::default())
//!     .given_state(TodoList::new())
//!     .when_action(TodoAction::Remove { id: TodoId::new(1) })
//!     .then_state(|list| assert!(list.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Route `tracing` output through the test harness's captured stdout.
///
/// Honors `RUST_LOG`, defaulting to `debug`. Safe to call from every test;
/// only the first call installs a subscriber.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    // Another test already installed the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
