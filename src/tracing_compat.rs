//! Logging shim over `tracing`.
//!
//! With `tracing-integration` enabled these are the `tracing` macros. Without
//! it they expand to nothing, so call sites never need their own `cfg`.

#[cfg(feature = "tracing-integration")]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing-integration"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing-integration"))]
macro_rules! warn_event {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use {debug, trace, warn_event as warn};
