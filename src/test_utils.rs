//! Shared helpers for unit tests.
//!
//! `init_test_logging` installs a `tracing-subscriber` fmt subscriber once per
//! process (filtered by `RUST_LOG`, default `trace` for this crate) when
//! `tracing-integration` is enabled. The macros mirror the ones used by the
//! integration tests under `tests/common`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the test subscriber. Safe to call from every test.
pub(crate) fn init_test_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-integration")]
        {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cvlock=trace"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .with_thread_ids(true)
                .try_init();
        }
    });
}

/// Marks the start of a test phase in the log output.
#[macro_export]
#[doc(hidden)]
macro_rules! test_phase {
    ($name:expr) => {
        eprintln!("=== PHASE: {} ===", $name);
    };
}

/// Marks successful completion of a test.
#[macro_export]
#[doc(hidden)]
macro_rules! test_complete {
    ($name:expr) => {
        eprintln!("=== COMPLETE: {} ===", $name);
    };
}

/// Asserts a condition, printing the expected and actual values on failure.
#[macro_export]
#[doc(hidden)]
macro_rules! assert_with_log {
    ($cond:expr, $what:expr, $expected:expr, $actual:expr) => {
        assert!(
            $cond,
            "{}: expected {:?}, actual {:?}",
            $what,
            $expected,
            $actual
        );
    };
}
