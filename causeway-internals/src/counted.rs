//! The ownership-counter contract and its generic implementation.
//!
//! [`RefCounted`] is the interface every object shared through a
//! [`RefPtr`](crate::RefPtr) implements. The counter lives inside the object
//! itself (it is *intrusive*), so a raw pointer to the object is enough to take
//! or drop a reference.
//!
//! Types that want to embed the counter directly implement the trait by
//! returning their [`RefCount`] field. Any other type can be wrapped in a
//! [`Counted<T>`], which places the counter in front of the value.

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::counter::{RefCount, Released};

/// An object whose lifetime is shared between several owners through an
/// embedded atomic counter.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// 1. [`ref_count`](RefCounted::ref_count) returns the same [`RefCount`] for
///    the whole lifetime of the object, and nothing else modifies that
///    counter.
/// 2. If the default [`release`](RefCounted::release) is kept, every instance
///    that is handed to a [`RefPtr`](crate::RefPtr) lives in its own `Box`
///    allocation. [`RefPtr::new`](crate::RefPtr::new) and
///    [`Counted::into_raw`] both satisfy this. Types with a different
///    allocation strategy must override `release` to match it.
///
/// # Examples
///
/// ```
/// use causeway_internals::{RefCount, RefCounted, RefPtr};
///
/// struct Session {
///     count: RefCount,
///     id: u32,
/// }
///
/// // SAFETY: `count` is a private field that is only touched through this
/// // trait, and sessions are only shared through `RefPtr::new`.
/// unsafe impl RefCounted for Session {
///     fn ref_count(&self) -> &RefCount {
///         &self.count
///     }
/// }
///
/// let session = RefPtr::new(Session { count: RefCount::new(), id: 7 });
/// let other = session.clone();
/// assert_eq!(session.strong_count(), 2);
/// assert_eq!(other.id, 7);
/// ```
pub unsafe trait RefCounted {
    /// Returns the counter embedded in this object.
    fn ref_count(&self) -> &RefCount;

    /// Registers one more owner of this object.
    #[inline]
    fn add_ref(&self) {
        self.ref_count().increment();
    }

    /// Drops one owner, destroying the object if it was the last one.
    ///
    /// Returns [`Released::Last`] when the object was destroyed by this call
    /// and [`Released::Alive`] otherwise.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `this` points to a live object allocated as required by the trait
    ///    contract.
    /// 2. The caller owns one reference that was previously registered with
    ///    [`add_ref`](RefCounted::add_ref), and gives it up with this call.
    /// 3. The pointer is not dereferenced again by the caller after this call
    ///    unless the caller still owns another reference.
    #[inline]
    unsafe fn release(this: NonNull<Self>) -> Released
    where
        Self: Sized,
    {
        // SAFETY: The object is live, because the caller still owns a
        // reference to it (guaranteed by the caller).
        let count = unsafe { this.as_ref() }.ref_count();

        let released = count.decrement();
        if released.is_last() {
            // SAFETY:
            // 1. The object was allocated in its own `Box` (trait contract).
            // 2. The counter just reached zero, so no other owner exists and
            //    nobody can observe the object after this point.
            let boxed = unsafe { Box::from_raw(this.as_ptr()) };
            drop(boxed);
        }
        released
    }
}

/// A heap header that makes any `T` reference counted.
///
/// `Counted<T>` stores a [`RefCount`] next to the value and dereferences to
/// the value. It is the building block for sharing types that do not embed a
/// counter themselves.
///
/// # Examples
///
/// ```
/// use causeway_internals::{Counted, RefPtr};
///
/// let shared: RefPtr<Counted<String>> = RefPtr::counted(String::from("hello"));
/// let copy = shared.clone();
/// assert_eq!(copy.len(), 5);
/// assert_eq!(shared.strong_count(), 2);
/// ```
pub struct Counted<T> {
    /// The owner counter.
    count: RefCount,
    /// The shared value.
    value: T,
}

impl<T> Counted<T> {
    /// Wraps a value with a counter that has no owners yet.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            count: RefCount::new(),
            value,
        }
    }

    /// Moves the value to the heap and returns a pointer to it while it still
    /// has no owners.
    ///
    /// The allocation is leaked until an owner attaches through
    /// [`RefPtr::from_raw`](crate::RefPtr::from_raw) and later releases it.
    #[inline]
    #[must_use]
    pub fn into_raw(value: T) -> NonNull<Self> {
        let boxed = Box::new(Self::new(value));
        NonNull::from(Box::leak(boxed))
    }

    /// Returns a reference to the wrapped value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }
}

// SAFETY:
// 1. `count` is private to this module and only exposed through this trait.
// 2. The default `release` is kept, and `Counted` values are only shared
//    through `RefPtr::new`, `RefPtr::counted` or `Counted::into_raw`, all of
//    which allocate a `Box` per instance.
unsafe impl<T> RefCounted for Counted<T> {
    #[inline]
    fn ref_count(&self) -> &RefCount {
        &self.count
    }
}

impl<T> core::ops::Deref for Counted<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> core::ops::DerefMut for Counted<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Counted<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Counted")
            .field("count", &self.count.get())
            .field("value", &self.value)
            .finish()
    }
}
