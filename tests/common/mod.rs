//! Shared helpers for integration tests.

#![allow(dead_code, unused_macros)]

use std::sync::Once;
use std::time::{Duration, Instant};

static INIT: Once = Once::new();

/// Installs a `tracing-subscriber` fmt subscriber once per test binary.
///
/// Verbosity follows `RUST_LOG` and defaults to `cvlock=trace`. Events are
/// only emitted when the crate is built with `tracing-integration`.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cvlock=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_thread_ids(true)
            .try_init();
    });
}

/// Runs `f` and returns its result together with the elapsed wall time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

macro_rules! test_phase {
    ($name:expr) => {
        eprintln!("=== PHASE: {} ===", $name);
    };
}

macro_rules! test_complete {
    ($name:expr) => {
        eprintln!("=== COMPLETE: {} ===", $name);
    };
}

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
