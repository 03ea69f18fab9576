//! Scoped acquisition for any lock exposing `lock()`/`unlock()`.
//!
//! [`ScopedLock`] acquires on construction and releases in `Drop`, so the
//! lock is released on every exit path from the scope: normal completion,
//! early `return`, `?` propagation and panic unwinding.

use std::marker::PhantomData;

/// A lock that can be acquired and released by the calling thread.
pub trait Lockable {
    /// Blocks until the calling thread holds the lock.
    fn lock(&self);

    /// Releases the lock held by the calling thread.
    fn unlock(&self);

    /// Acquires the lock and returns a guard that releases it on drop.
    fn scoped(&self) -> ScopedLock<'_, Self>
    where
        Self: Sized,
    {
        ScopedLock::new(self)
    }
}

impl<L: Lockable + ?Sized> Lockable for &L {
    fn lock(&self) {
        (**self).lock();
    }

    fn unlock(&self) {
        (**self).unlock();
    }
}

/// Guard holding a [`Lockable`] for the rest of its scope.
///
/// The guard is not `Send`: it must be dropped on the thread that acquired
/// it, which is what a [`ReentrantLock`](crate::ReentrantLock) owner check
/// expects.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScopedLock<'a, L: Lockable + ?Sized> {
    lock: &'a L,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: Lockable + ?Sized> ScopedLock<'a, L> {
    /// Acquires `lock`, blocking until it is available.
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Returns the lock this guard holds.
    #[must_use]
    pub fn lock(&self) -> &'a L {
        self.lock
    }
}

impl<L: Lockable + ?Sized> Drop for ScopedLock<'_, L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

impl<L: Lockable + ?Sized> std::fmt::Debug for ScopedLock<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedLock").finish_non_exhaustive()
    }
}
