//! Feature-gated lock contention metrics.
//!
//! When the `lock-metrics` feature is enabled, every [`ExclusiveLock`] and
//! [`ReentrantLock`] counts acquisitions and contentions and accumulates wait
//! and hold time. When disabled, the counters are zero-sized and every
//! recording call compiles to nothing.
//!
//! # Usage
//!
//! ```
//! use cvlock::ExclusiveLock;
//!
//! let lock = ExclusiveLock::named("tasks");
//! lock.lock();
//! lock.unlock();
//!
//! let snap = lock.snapshot();
//! assert_eq!(snap.name, "tasks");
//! # #[cfg(feature = "lock-metrics")]
//! assert_eq!(snap.acquisitions, 1);
//! ```
//!
//! [`ExclusiveLock`]: crate::ExclusiveLock
//! [`ReentrantLock`]: crate::ReentrantLock

use serde::Serialize;

/// Snapshot of lock contention metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LockMetricsSnapshot {
    /// Human-readable name of the lock.
    pub name: &'static str,
    /// Total number of successful acquisitions, reentrant ones included.
    pub acquisitions: u64,
    /// Acquisitions that had to park or lost the claim race at least once.
    pub contentions: u64,
    /// Cumulative nanoseconds spent waiting to acquire the lock.
    pub wait_ns: u64,
    /// Cumulative nanoseconds the lock was held, outermost acquisition to
    /// final release.
    pub hold_ns: u64,
    /// Maximum single wait duration in nanoseconds.
    pub max_wait_ns: u64,
    /// Maximum single hold duration in nanoseconds.
    pub max_hold_ns: u64,
}

// ── Feature-gated implementation ──────────────────────────────────────────

#[cfg(feature = "lock-metrics")]
mod inner {
    use super::LockMetricsSnapshot;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Instant;

    /// Point in time at which a wait or hold interval started.
    pub(crate) type Stamp = Instant;

    /// Counters split into two cache lines: the acquire path and the
    /// release path touch disjoint halves. The 64-byte alignment keeps the
    /// padding on a line boundary.
    #[derive(Debug)]
    #[repr(C, align(64))]
    pub(crate) struct LockMetrics {
        // ── Cache line 1: updated on lock() ──
        acquisitions: AtomicU64,
        contentions: AtomicU64,
        wait_ns: AtomicU64,
        max_wait_ns: AtomicU64,
        _pad: [u8; 32],
        // ── Cache line 2: updated on unlock() ──
        hold_ns: AtomicU64,
        max_hold_ns: AtomicU64,
    }

    impl LockMetrics {
        pub(crate) const fn new() -> Self {
            Self {
                acquisitions: AtomicU64::new(0),
                contentions: AtomicU64::new(0),
                wait_ns: AtomicU64::new(0),
                max_wait_ns: AtomicU64::new(0),
                _pad: [0; 32],
                hold_ns: AtomicU64::new(0),
                max_hold_ns: AtomicU64::new(0),
            }
        }

        #[inline]
        pub(crate) fn start() -> Stamp {
            Instant::now()
        }

        /// Records an acquisition that waited since `waiting_since` and
        /// returns the start of the hold interval.
        pub(crate) fn record_acquired(&self, waiting_since: Stamp, contended: bool) -> Stamp {
            let now = Instant::now();
            let wait_ns = elapsed_ns(waiting_since, now);

            self.acquisitions.fetch_add(1, Ordering::Relaxed);
            self.wait_ns.fetch_add(wait_ns, Ordering::Relaxed);
            update_max(&self.max_wait_ns, wait_ns);
            if contended {
                self.contentions.fetch_add(1, Ordering::Relaxed);
            }
            now
        }

        /// Records a reentrant acquisition. It never waits and does not open
        /// a new hold interval.
        pub(crate) fn record_reentered(&self) {
            self.acquisitions.fetch_add(1, Ordering::Relaxed);
        }

        /// Closes the hold interval opened at `held_since`.
        pub(crate) fn record_released(&self, held_since: Option<Stamp>) {
            let Some(held_since) = held_since else {
                return;
            };
            let hold_ns = elapsed_ns(held_since, Instant::now());
            self.hold_ns.fetch_add(hold_ns, Ordering::Relaxed);
            update_max(&self.max_hold_ns, hold_ns);
        }

        pub(crate) fn snapshot(&self, name: &'static str) -> LockMetricsSnapshot {
            LockMetricsSnapshot {
                name,
                acquisitions: self.acquisitions.load(Ordering::Relaxed),
                contentions: self.contentions.load(Ordering::Relaxed),
                wait_ns: self.wait_ns.load(Ordering::Relaxed),
                hold_ns: self.hold_ns.load(Ordering::Relaxed),
                max_wait_ns: self.max_wait_ns.load(Ordering::Relaxed),
                max_hold_ns: self.max_hold_ns.load(Ordering::Relaxed),
            }
        }

        pub(crate) fn reset(&self) {
            self.acquisitions.store(0, Ordering::Relaxed);
            self.contentions.store(0, Ordering::Relaxed);
            self.wait_ns.store(0, Ordering::Relaxed);
            self.hold_ns.store(0, Ordering::Relaxed);
            self.max_wait_ns.store(0, Ordering::Relaxed);
            self.max_hold_ns.store(0, Ordering::Relaxed);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_ns(from: Instant, to: Instant) -> u64 {
        to.saturating_duration_since(from).as_nanos() as u64
    }

    fn update_max(current: &AtomicU64, value: u64) {
        let mut old = current.load(Ordering::Relaxed);
        while value > old {
            match current.compare_exchange_weak(old, value, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => break,
                Err(actual) => old = actual,
            }
        }
    }
}

// ── No-op implementation (feature disabled) ───────────────────────────────

#[cfg(not(feature = "lock-metrics"))]
mod inner {
    use super::LockMetricsSnapshot;

    pub(crate) type Stamp = ();

    /// Zero-sized counters (metrics disabled).
    #[derive(Debug)]
    pub(crate) struct LockMetrics;

    impl LockMetrics {
        pub(crate) const fn new() -> Self {
            Self
        }

        #[inline]
        pub(crate) fn start() -> Stamp {}

        #[inline]
        pub(crate) fn record_acquired(&self, _waiting_since: Stamp, _contended: bool) -> Stamp {}

        #[inline]
        pub(crate) fn record_reentered(&self) {}

        #[inline]
        pub(crate) fn record_released(&self, _held_since: Option<Stamp>) {}

        pub(crate) fn snapshot(&self, name: &'static str) -> LockMetricsSnapshot {
            LockMetricsSnapshot {
                name,
                ..Default::default()
            }
        }

        #[inline]
        pub(crate) fn reset(&self) {}
    }
}

pub(crate) use inner::{LockMetrics, Stamp};
