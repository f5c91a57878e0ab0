//! The atomic ownership counter.
//!
//! A [`RefCount`] counts the owners of one heap object. It starts at zero,
//! before any owner has attached, and the object it guards is destroyed by
//! whoever observes the transition back to zero.
//!
//! # Memory Ordering
//!
//! The orderings follow the ones used by `alloc::sync::Arc`:
//!
//! - Increments are `Relaxed`: taking a new reference requires already
//!   holding one, so no other memory needs to be synchronized.
//! - Decrements are `Release`, and the decrement that reaches zero is
//!   followed by an `Acquire` fence. This makes every use of the object by
//!   other owners happen-before its destruction.

use crate::sync::{AtomicUsize, Ordering, fence};

/// Counts above this are treated as a leak of owners and abort the increment.
///
/// Keeping the count below `isize::MAX` leaves enough headroom that racing
/// increments cannot wrap the counter before one of them notices.
const MAX_REFCOUNT: usize = isize::MAX as usize;

/// Result of releasing one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "the release signal tells whether the object was destroyed"]
pub enum Released {
    /// Other owners remain; the object is still alive.
    Alive,
    /// The released reference was the last one; the object has been (or, at
    /// the counter level, must now be) destroyed.
    Last,
}

impl Released {
    /// Returns `true` if this was the last reference.
    #[inline]
    pub fn is_last(self) -> bool {
        matches!(self, Released::Last)
    }
}

/// An atomic, never-negative owner counter.
///
/// The counter is the only state that may be mutated concurrently from
/// several threads without external locking.
///
/// # Examples
///
/// ```
/// use causeway_internals::{RefCount, Released};
///
/// let count = RefCount::new();
/// assert_eq!(count.get(), 0);
///
/// count.increment();
/// count.increment();
/// assert_eq!(count.decrement(), Released::Alive);
/// assert_eq!(count.decrement(), Released::Last);
/// ```
pub struct RefCount {
    /// Number of live owners.
    count: AtomicUsize,
}

impl RefCount {
    /// Creates a counter with no owners.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }

    /// Adds one owner.
    ///
    /// # Panics
    ///
    /// Panics if the number of owners would exceed `isize::MAX`, which can
    /// only happen when references are leaked in a loop.
    #[inline]
    pub fn increment(&self) {
        let previous = self.count.fetch_add(1, Ordering::Relaxed);
        if previous >= MAX_REFCOUNT {
            overflow();
        }
    }

    /// Removes one owner and reports whether it was the last one.
    ///
    /// When this returns [`Released::Last`] every previous use of the guarded
    /// object by other owners is visible to the calling thread, so the caller
    /// may destroy it.
    ///
    /// # Panics
    ///
    /// Panics if the counter was already zero. Releasing more references than
    /// were acquired is a programming error, and continuing would mean a
    /// double free.
    #[inline]
    pub fn decrement(&self) -> Released {
        let previous = self.count.fetch_sub(1, Ordering::Release);
        match previous {
            0 => underflow(),
            1 => {
                fence(Ordering::Acquire);
                Released::Last
            }
            _ => Released::Alive,
        }
    }

    /// Returns `true` if there is exactly one owner.
    ///
    /// When this returns `true`, every use of the guarded object by owners
    /// that have since released it is visible to the calling thread.
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.count.load(Ordering::Acquire) == 1
    }

    /// Returns a snapshot of the number of owners.
    ///
    /// The value may be stale as soon as it is returned when other threads
    /// hold references; it is meant for diagnostics and tests.
    #[inline]
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for RefCount {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for RefCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RefCount").field(&self.get()).finish()
    }
}

/// Out-of-line panic for a leaked owner count.
#[cold]
#[inline(never)]
fn overflow() -> ! {
    panic!("RefCount overflow: too many owners")
}

/// Out-of-line panic for a release without a matching acquire.
#[cold]
#[inline(never)]
fn underflow() -> ! {
    panic!("RefCount underflow: released a reference that was never acquired")
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(RefCount::new().get(), 0);
        assert_eq!(RefCount::default().get(), 0);
    }

    #[test]
    fn test_matched_pairs_end_at_last() {
        let count = RefCount::new();
        for _ in 0..5 {
            count.increment();
        }
        for _ in 0..4 {
            assert_eq!(count.decrement(), Released::Alive);
        }
        assert!(count.decrement().is_last());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_unique_only_with_one_owner() {
        let count = RefCount::new();
        assert!(!count.is_unique());
        count.increment();
        assert!(count.is_unique());
        count.increment();
        assert!(!count.is_unique());
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn test_underflow_panics() {
        let count = RefCount::new();
        let _ = count.decrement();
    }

    #[test]
    fn test_debug_shows_count() {
        let count = RefCount::new();
        count.increment();
        assert_eq!(alloc::format!("{count:?}"), "RefCount(1)");
    }
}
