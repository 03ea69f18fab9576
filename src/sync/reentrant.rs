//! Reentrant (recursive) lock.
//!
//! Same wait/claim protocol as [`ExclusiveLock`](crate::ExclusiveLock),
//! guarded on a recursion count instead of a flag, plus an owner identity so
//! the holding thread can re-acquire without blocking.
//!
//! # State machine
//!
//! ```text
//! FREE (count 0, no owner)  --lock(T)-->    HELD(1, T)
//! HELD(n, T)                --lock(T)-->    HELD(n + 1, T)
//! HELD(n, T)                --lock(U)-->    U parks until FREE
//! HELD(n > 1, T)            --unlock(T)-->  HELD(n - 1, T)
//! HELD(1, T)                --unlock(T)-->  FREE
//! HELD(n, T)                --unlock(U)-->  rejected (NotOwner)
//! FREE                      --unlock(_)-->  rejected (NotLocked)
//! ```

use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::error::UnlockError;
use crate::sync::Lockable;
use crate::sync::metrics::{LockMetrics, LockMetricsSnapshot, Stamp};
use crate::tracing_compat::{debug, trace};

/// A single-owner lock that the owning thread may acquire repeatedly.
///
/// Each `lock()` by the owner must be balanced by an `unlock()` from the
/// same thread; the lock becomes available to other threads once the count
/// returns to zero. Releases from any other thread are rejected.
///
/// # Example
///
/// ```
/// use cvlock::ReentrantLock;
///
/// let lock = ReentrantLock::new();
/// lock.lock();
/// lock.lock();
/// assert_eq!(lock.lock_count(), 2);
/// lock.unlock();
/// lock.unlock();
/// assert!(!lock.is_locked());
/// ```
pub struct ReentrantLock {
    name: &'static str,
    state: Mutex<ReentrantState>,
    released: Condvar,
    metrics: LockMetrics,
}

/// `count == 0` iff `owner.is_none()`.
#[derive(Debug)]
struct ReentrantState {
    count: u64,
    owner: Option<ThreadId>,
    held_since: Option<Stamp>,
}

impl ReentrantState {
    fn is_held_by(&self, id: ThreadId) -> bool {
        self.count > 0 && self.owner == Some(id)
    }
}

impl ReentrantLock {
    /// Creates a new, unlocked lock.
    #[must_use]
    pub const fn new() -> Self {
        Self::named("reentrant")
    }

    /// Creates a new, unlocked lock with a name used in logs and metrics.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(ReentrantState {
                count: 0,
                owner: None,
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

    /// Returns the current recursion depth; 0 when free.
    #[must_use]
    pub fn lock_count(&self) -> u64 {
        self.state.lock().count
    }

    /// Returns true if some thread currently holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.lock().count > 0
    }

    /// Returns true if the calling thread currently holds the lock.
    #[must_use]
    pub fn is_owned_by_current_thread(&self) -> bool {
        self.state.lock().is_held_by(thread::current().id())
    }

    /// Acquires the lock, blocking unless the calling thread already owns it.
    #[cfg_attr(not(feature = "lock-metrics"), allow(clippy::let_unit_value))]
    pub fn lock(&self) {
        let me = thread::current().id();

        {
            let mut state = self.state.lock();
            if state.is_held_by(me) {
                state.count += 1;
                trace!(lock = self.name, depth = state.count, "reentrant lock re-entered");
                drop(state);
                self.metrics.record_reentered();
                return;
            }
        }

        let waiting_since = LockMetrics::start();
        let mut contended = false;

        loop {
            {
                let mut state = self.state.lock();
                if state.count != 0 {
                    contended = true;
                }
                self.released.wait_while(&mut state, |state| state.count != 0);
            }

            let Some(mut state) = self.state.try_lock() else {
                contended = true;
                continue;
            };
            if state.count != 0 {
                contended = true;
                continue;
            }

            state.count = 1;
            state.owner = Some(me);
            state.held_since = Some(self.metrics.record_acquired(waiting_since, contended));
            drop(state);

            if contended {
                debug!(lock = self.name, "reentrant lock acquired after contention");
            } else {
                trace!(lock = self.name, "reentrant lock acquired");
            }
            return;
        }
    }

    /// Releases one level of ownership.
    ///
    /// A release by a thread that does not hold the lock is reported as a
    /// log event and leaves the lock untouched; use
    /// [`try_unlock`](Self::try_unlock) to observe it.
    pub fn unlock(&self) {
        if let Err(err) = self.try_unlock() {
            super::rejected_release(self.name, err);
        }
    }

    /// Releases one level of ownership.
    ///
    /// Fails with [`UnlockError::NotLocked`] when the lock is free and with
    /// [`UnlockError::NotOwner`] when another thread holds it. The state is
    /// unchanged on failure.
    pub fn try_unlock(&self) -> Result<(), UnlockError> {
        let me = thread::current().id();

        let (depth, held_since) = {
            let mut state = self.state.lock();
            if state.count == 0 {
                return Err(UnlockError::NotLocked);
            }
            if state.owner != Some(me) {
                return Err(UnlockError::NotOwner);
            }

            state.count -= 1;
            if state.count == 0 {
                state.owner = None;
                (0, state.held_since.take())
            } else {
                (state.count, None)
            }
        };
        self.released.notify_all();

        if depth == 0 {
            self.metrics.record_released(held_since);
            trace!(lock = self.name, "reentrant lock released");
        } else {
            trace!(lock = self.name, depth, "reentrant lock level released");
        }
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

impl Default for ReentrantLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReentrantLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReentrantLock")
            .field("name", &self.name)
            .field("count", &state.count)
            .field("owner", &state.owner)
            .finish_non_exhaustive()
    }
}

impl Lockable for ReentrantLock {
    #[inline]
    fn lock(&self) {
        Self::lock(self);
    }

    #[inline]
    fn unlock(&self) {
        Self::unlock(self);
    }
}
