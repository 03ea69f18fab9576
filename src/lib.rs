//! Exclusive and reentrant locks built on a condition-variable protocol.
//!
//! Both locks keep their state behind a small internal guard paired with a
//! condition variable. Acquisition follows a two-phase protocol:
//!
//! - **Phase 1 (Wait)**: park on the condition variable until the lock looks
//!   free.
//! - **Phase 2 (Claim)**: take the guard without blocking and re-check the
//!   state. A thread that lost the race between wake-up and claim goes back
//!   to phase 1.
//!
//! Release clears the state and wakes every parked thread. There is no FIFO
//! ordering among waiters.
//!
//! # Primitives
//!
//! - [`ExclusiveLock`]: single-owner, non-reentrant lock.
//! - [`ReentrantLock`]: single-owner lock the owning thread may re-acquire.
//! - [`ScopedLock`]: guard that releases any [`Lockable`] on scope exit.
//!
//! # Example
//!
//! ```
//! use cvlock::{Lockable, ReentrantLock};
//!
//! let lock = ReentrantLock::new();
//! {
//!     let _outer = lock.scoped();
//!     let _inner = lock.scoped();
//!     assert_eq!(lock.lock_count(), 2);
//! }
//! assert!(!lock.is_locked());
//! ```
//!
//! # Features
//!
//! - `lock-metrics`: per-lock contention and hold-time counters.
//! - `tracing-integration`: structured log events via `tracing`.
//! - `loom-tests`: loom models of the acquisition protocol.

pub mod error;
pub mod sync;
mod tracing_compat;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::UnlockError;
pub use sync::{ExclusiveLock, LockMetricsSnapshot, Lockable, ReentrantLock, ScopedLock};
