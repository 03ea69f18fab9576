//! Lock primitives built on a condition-variable wait/claim protocol.
//!
//! # Primitives
//!
//! - [`ExclusiveLock`]: single-owner, non-reentrant lock
//! - [`ReentrantLock`]: single-owner lock the holder may re-acquire
//! - [`ScopedLock`]: releases any [`Lockable`] when dropped
//!
//! # Acquisition protocol
//!
//! Both locks acquire in the same two phases:
//!
//! - **Phase 1 (Wait)**: park on the condition variable until the state
//!   predicate (flag clear / count zero) holds.
//! - **Phase 2 (Claim)**: take the internal guard without blocking and
//!   re-check the predicate. On a failed claim or a stale predicate, go back
//!   to phase 1.
//!
//! Release wakes all waiters. Waiters are not queued, so a thread can lose
//! every race under sustained contention.

mod exclusive;
mod metrics;
mod reentrant;
mod scoped;

pub use exclusive::ExclusiveLock;
pub use metrics::LockMetricsSnapshot;
pub use reentrant::ReentrantLock;
pub use scoped::{Lockable, ScopedLock};

use crate::error::UnlockError;
use crate::tracing_compat::warn;

#[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
fn rejected_release(lock: &'static str, err: UnlockError) {
    warn!(lock, error = %err, "lock release rejected");
}
