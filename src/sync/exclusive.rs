//! Non-reentrant exclusive lock.
//!
//! The lock state is a single flag kept behind a `parking_lot` guard. Waiters
//! park on a condition variable until the flag clears, then claim the guard
//! with `try_lock` and re-check the flag before taking ownership: the
//! predicate only held at wake-up, not at the later moment the guard was
//! obtained.

use parking_lot::{Condvar, Mutex};

use crate::error::UnlockError;
use crate::sync::Lockable;
use crate::sync::metrics::{LockMetrics, LockMetricsSnapshot, Stamp};
use crate::tracing_compat::{debug, trace};

/// A single-owner, non-reentrant lock.
///
/// The lock carries no owner identity: any thread may release it, which
/// allows hand-off patterns where one thread acquires and another releases.
/// Re-acquiring from the thread that already holds it deadlocks.
///
/// # Example
///
/// ```
/// use cvlock::{ExclusiveLock, Lockable};
///
/// static LOCK: ExclusiveLock = ExclusiveLock::named("config");
///
/// {
///     let _guard = LOCK.scoped();
///     assert!(LOCK.is_locked());
/// }
/// assert!(!LOCK.is_locked());
/// ```
pub struct ExclusiveLock {
    name: &'static str,
    state: Mutex<ExclusiveState>,
    released: Condvar,
    metrics: LockMetrics,
}

#[derive(Debug)]
struct ExclusiveState {
    locked: bool,
    held_since: Option<Stamp>,
}

impl ExclusiveLock {
    /// Creates a new, unlocked lock.
    #[must_use]
    pub const fn new() -> Self {
        Self::named("exclusive")
    }

    /// Creates a new, unlocked lock with a name used in logs and metrics.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(ExclusiveState {
                locked: false,
                held_since: None,
            }),
            released: Condvar::new(),
            metrics: LockMetrics::new(),
        }
    }

    /// Returns the lock name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if some thread currently holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Blocks the calling thread until the lock is acquired.
    #[cfg_attr(not(feature = "lock-metrics"), allow(clippy::let_unit_value))]
    pub fn lock(&self) {
        let waiting_since = LockMetrics::start();
        let mut contended = false;

        loop {
            {
                let mut state = self.state.lock();
                if state.locked {
                    contended = true;
                }
                self.released.wait_while(&mut state, |state| state.locked);
            }

            // The flag was clear at wake-up; another thread may have claimed
            // it before we get the guard back.
            let Some(mut state) = self.state.try_lock() else {
                contended = true;
                continue;
            };
            if state.locked {
                contended = true;
                continue;
            }

            state.locked = true;
            state.held_since = Some(self.metrics.record_acquired(waiting_since, contended));
            drop(state);

            if contended {
                debug!(lock = self.name, "exclusive lock acquired after contention");
            } else {
                trace!(lock = self.name, "exclusive lock acquired");
            }
            return;
        }
    }

    /// Releases the lock and wakes every waiter.
    ///
    /// Releasing a lock that is not held is reported as a log event and
    /// otherwise ignored; use [`try_unlock`](Self::try_unlock) to observe it.
    pub fn unlock(&self) {
        if let Err(err) = self.try_unlock() {
            super::rejected_release(self.name, err);
        }
    }

    /// Releases the lock, failing with [`UnlockError::NotLocked`] when it is
    /// not held.
    pub fn try_unlock(&self) -> Result<(), UnlockError> {
        let held_since = {
            let mut state = self.state.lock();
            if !state.locked {
                return Err(UnlockError::NotLocked);
            }
            state.locked = false;
            state.held_since.take()
        };
        // Any subset of the woken threads may lose the next claim race, so
        // all of them have to re-evaluate.
        self.released.notify_all();

        self.metrics.record_released(held_since);
        trace!(lock = self.name, "exclusive lock released");
        Ok(())
    }

    /// Returns a snapshot of the lock metrics.
    ///
    /// Counters are only maintained with the `lock-metrics` feature.
    #[must_use]
    pub fn snapshot(&self) -> LockMetricsSnapshot {
        self.metrics.snapshot(self.name)
    }

    /// Resets all lock metrics to zero.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }
}

impl Default for ExclusiveLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExclusiveLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusiveLock")
            .field("name", &self.name)
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}

impl Lockable for ExclusiveLock {
    #[inline]
    fn lock(&self) {
        Self::lock(self);
    }

    #[inline]
    fn unlock(&self) {
        Self::unlock(self);
    }
}
