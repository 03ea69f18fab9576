//! Error types for lock release.
//!
//! Acquisition has no failure mode: `lock()` blocks until it succeeds.
//! Release can be rejected when the caller does not hold the lock, which is
//! reported through [`UnlockError`] by the checked `try_unlock` methods.

/// Error returned when a lock cannot be released by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnlockError {
    /// The lock is not held by anyone.
    #[error("lock is not held")]
    NotLocked,
    /// The lock is held, but by a different thread than the caller.
    #[error("lock is held by another thread")]
    NotOwner,
}
