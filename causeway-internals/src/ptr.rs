//! The owning pointer over [`RefCounted`] objects.
//!
//! This module encapsulates the `ptr` field of [`RefPtr`], ensuring it is only
//! visible within this module. This visibility restriction guarantees the
//! safety invariant: **a non-null pointer always carries one counted
//! reference that this `RefPtr` owns**.
//!
//! # Safety Invariant
//!
//! The field can only become non-null through [`RefPtr::new`],
//! [`RefPtr::from_raw`] (which increments the counter) or [`RefPtr::adopt`]
//! (whose caller hands over an already counted reference). It only becomes
//! null again through [`Drop`], [`RefPtr::release`] (which decrement) or
//! [`RefPtr::detach`] (which hands the reference back to the caller).

use alloc::boxed::Box;
use core::{marker::PhantomData, ptr::NonNull};

use crate::{
    counted::{Counted, RefCounted},
    counter::Released,
};

/// A nullable smart pointer that shares ownership of a [`RefCounted`]
/// object.
///
/// The object lives as long as at least one `RefPtr` references it. Cloning
/// takes a new reference, dropping gives it up, and moving a `RefPtr` moves
/// its reference without touching the counter.
///
/// # Examples
///
/// ```
/// use causeway_internals::{Counted, RefPtr};
///
/// let mut first = RefPtr::counted(42_u32);
/// let second = first.clone();
/// assert_eq!(first.strong_count(), 2);
///
/// // Moving out leaves a null pointer behind and does not touch the count.
/// let moved = first.take();
/// assert!(first.is_null());
/// assert_eq!(moved.strong_count(), 2);
///
/// drop(moved);
/// assert_eq!(second.strong_count(), 1);
/// assert_eq!(**second, 42);
/// ```
pub struct RefPtr<T: RefCounted> {
    /// The referenced object, or `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. If `Some`, the pointee is a live `T` allocated as required by the
    ///    [`RefCounted`] contract.
    /// 2. If `Some`, this `RefPtr` owns exactly one counted reference to the
    ///    pointee.
    ptr: Option<NonNull<T>>,

    /// Marker telling the drop checker that we may drop a `T`.
    _marker: PhantomData<T>,
}

// SAFETY: A `RefPtr<T>` gives shared access to `T` and may drop `T` on any
// thread, which is sound exactly when `T: Send + Sync`, as with `Arc`.
unsafe impl<T: RefCounted + Send + Sync> Send for RefPtr<T> {}

// SAFETY: See the `Send` implementation.
unsafe impl<T: RefCounted + Send + Sync> Sync for RefPtr<T> {}

impl<T: RefCounted> RefPtr<T> {
    /// Creates a pointer that references nothing.
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Self {
            ptr: None,
            _marker: PhantomData,
        }
    }

    /// Moves `value` to the heap and returns the first owner of it.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        let ptr = NonNull::from(Box::leak(Box::new(value)));

        // SAFETY:
        // 1. `ptr` is live and was allocated in its own `Box`.
        // 2. The pointer has no other owners yet, and its counter was not
        //    touched by anyone else.
        unsafe { Self::from_raw(ptr) }
    }

    /// Takes a new reference to the object behind `ptr`.
    ///
    /// This increments the counter, like constructing an owner from a raw
    /// pointer that someone else keeps alive.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `T` allocated as required by the
    ///    [`RefCounted`] contract.
    /// 2. The object is kept alive for the duration of this call, either by
    ///    another owner or because no owner has attached to it yet.
    #[inline]
    #[must_use]
    pub unsafe fn from_raw(ptr: NonNull<T>) -> Self {
        // SAFETY: The pointee is live (guaranteed by the caller).
        let object = unsafe { ptr.as_ref() };
        object.add_ref();

        Self {
            // SAFETY:
            // 1. Guaranteed by the caller.
            // 2. We just registered the reference we now own.
            ptr: Some(ptr),
            _marker: PhantomData,
        }
    }

    /// Takes over a reference that was counted earlier, without incrementing.
    ///
    /// This is the inverse of [`detach`](Self::detach).
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `T` allocated as required by the
    ///    [`RefCounted`] contract.
    /// 2. The caller owns one counted reference to the object and transfers it
    ///    to the returned `RefPtr`.
    #[inline]
    #[must_use]
    pub unsafe fn adopt(ptr: NonNull<T>) -> Self {
        Self {
            // SAFETY: Both invariants are guaranteed by the caller.
            ptr: Some(ptr),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if this pointer references nothing.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns a reference to the object, or `None` for a null pointer.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        let ptr = self.ptr?;
        // SAFETY: The pointee is live for as long as we hold our reference,
        // which outlives the returned borrow of `self`.
        Some(unsafe { ptr.as_ref() })
    }

    /// Returns a mutable reference to the object if this pointer is its only
    /// owner, or `None` if it is shared or null.
    ///
    /// # Examples
    ///
    /// ```
    /// use causeway_internals::RefPtr;
    ///
    /// let mut only = RefPtr::counted(String::from("draft"));
    /// only.get_mut().unwrap().push_str(" v2");
    ///
    /// let shared = only.clone();
    /// assert!(only.get_mut().is_none());
    /// assert_eq!(**shared, "draft v2");
    /// ```
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if !self.get()?.ref_count().is_unique() {
            return None;
        }
        let mut ptr = self.ptr?;
        // SAFETY:
        // 1. The pointee is live (invariant 1).
        // 2. We own the only counted reference, and `&mut self` rules out any
        //    other borrow through this pointer for the returned lifetime.
        Some(unsafe { ptr.as_mut() })
    }

    /// Returns the raw pointer without affecting the counter.
    #[inline]
    pub fn as_ptr(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Moves the reference out, leaving a null pointer behind.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Gives up the held reference and becomes null.
    ///
    /// The object is destroyed if this was its last owner. Returns `None` if
    /// the pointer was already null, otherwise the signal from
    /// [`RefCounted::release`].
    #[inline]
    pub fn release(&mut self) -> Option<Released> {
        let ptr = self.ptr.take()?;

        // SAFETY:
        // 1. The pointee is live and correctly allocated (invariant 1).
        // 2. We own one counted reference (invariant 2), and we just cleared
        //    our field, so we give it up here.
        // 3. We no longer hold the pointer.
        Some(unsafe { T::release(ptr) })
    }

    /// Hands the held reference to the caller and becomes null, without
    /// decrementing.
    ///
    /// The caller becomes responsible for the reference, usually by passing
    /// it to [`adopt`](Self::adopt) later. Forgetting to do so leaks the
    /// object.
    #[inline]
    #[must_use = "dropping the detached pointer leaks the object"]
    pub fn detach(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Makes this pointer reference the same object as `other`.
    ///
    /// The new reference is acquired before the old one is released, so
    /// assigning a pointer to itself, or to another owner of the same object,
    /// never destroys it.
    #[inline]
    pub fn assign(&mut self, other: &Self) {
        if self.ptr_eq(other) {
            return;
        }
        let acquired = other.clone();
        *self = acquired;
    }

    /// Exchanges the targets of two pointers without touching either counter.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.ptr, &mut other.ptr);
    }

    /// Returns `true` if both pointers reference the same object, or are both
    /// null.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }

    /// Returns a snapshot of the number of owners of the object, or `0` for a
    /// null pointer.
    #[inline]
    pub fn strong_count(&self) -> usize {
        self.get().map_or(0, |object| object.ref_count().get())
    }
}

impl<T> RefPtr<Counted<T>> {
    /// Wraps `value` in a [`Counted`] header and returns the first owner.
    #[inline]
    #[must_use]
    pub fn counted(value: T) -> Self {
        Self::new(Counted::new(value))
    }
}

impl<T: RefCounted> Clone for RefPtr<T> {
    #[inline]
    fn clone(&self) -> Self {
        match self.ptr {
            // SAFETY:
            // 1. The pointee is live and correctly allocated (invariant 1).
            // 2. Our own reference keeps it alive during the call.
            Some(ptr) => unsafe { Self::from_raw(ptr) },
            None => Self::null(),
        }
    }
}

impl<T: RefCounted> Drop for RefPtr<T> {
    #[inline]
    fn drop(&mut self) {
        let _ = self.release();
    }
}

impl<T: RefCounted> Default for RefPtr<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: RefCounted> core::ops::Deref for RefPtr<T> {
    type Target = T;

    /// Dereferences to the object.
    ///
    /// # Panics
    ///
    /// Panics if the pointer is null. Use [`RefPtr::get`] when the pointer may
    /// be null.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(object) => object,
            None => null_deref(),
        }
    }
}

impl<T: RefCounted> From<T> for RefPtr<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: RefCounted> PartialEq for RefPtr<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: RefCounted> Eq for RefPtr<T> {}

impl<T: RefCounted + core::fmt::Debug> core::fmt::Debug for RefPtr<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(object) => f.debug_tuple("RefPtr").field(object).finish(),
            None => f.write_str("RefPtr(null)"),
        }
    }
}

/// Out-of-line panic for dereferencing a null [`RefPtr`].
#[cold]
#[inline(never)]
#[track_caller]
fn null_deref() -> ! {
    panic!("dereferenced a null RefPtr")
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use alloc::string::String;

    use super::*;

    static_assertions::assert_impl_all!(RefPtr<Counted<String>>: Send, Sync);
    static_assertions::assert_not_impl_any!(RefPtr<Counted<core::cell::Cell<u8>>>: Send, Sync);
    static_assertions::assert_eq_size!(RefPtr<Counted<u64>>, usize);

    #[test]
    fn test_null_pointer() {
        let mut ptr: RefPtr<Counted<u8>> = RefPtr::default();
        assert!(ptr.is_null());
        assert!(ptr.get().is_none());
        assert_eq!(ptr.strong_count(), 0);
        assert_eq!(ptr.release(), None);
        assert!(ptr.detach().is_none());
        assert_eq!(alloc::format!("{ptr:?}"), "RefPtr(null)");
    }

    #[test]
    #[should_panic(expected = "null RefPtr")]
    fn test_deref_null_panics() {
        let ptr: RefPtr<Counted<u8>> = RefPtr::null();
        let _ = **ptr;
    }

    #[test]
    fn test_self_assignment_keeps_count() {
        let mut ptr = RefPtr::counted(String::from("value"));
        let alias = ptr.clone();
        assert_eq!(ptr.strong_count(), 2);

        ptr.assign(&alias);
        assert_eq!(ptr.strong_count(), 2);
        assert!(ptr.ptr_eq(&alias));

        let same = ptr.clone();
        ptr.assign(&same);
        drop(same);
        assert_eq!(ptr.strong_count(), 2);
        assert_eq!(ptr.as_str(), "value");
    }

    #[test]
    fn test_assign_releases_old_target() {
        let mut ptr = RefPtr::counted(1_u32);
        let old = ptr.clone();
        let other = RefPtr::counted(2_u32);

        ptr.assign(&other);
        assert_eq!(**ptr, 2);
        assert_eq!(old.strong_count(), 1);
        assert_eq!(other.strong_count(), 2);
    }

    #[test]
    fn test_detach_and_adopt_preserve_count() {
        let mut ptr = RefPtr::counted(3_u32);
        let keep = ptr.clone();

        let raw = ptr.detach().unwrap();
        assert!(ptr.is_null());
        assert_eq!(keep.strong_count(), 2);

        // SAFETY: `raw` carries the reference detached above.
        let adopted = unsafe { RefPtr::adopt(raw) };
        assert_eq!(keep.strong_count(), 2);
        assert!(adopted.ptr_eq(&keep));
    }

    #[test]
    fn test_release_reports_last_owner() {
        let mut first = RefPtr::counted(4_u32);
        let mut second = first.clone();
        assert_eq!(first.release(), Some(Released::Alive));
        assert_eq!(second.release(), Some(Released::Last));
        assert!(first.is_null() && second.is_null());
    }

    #[test]
    fn test_get_mut_requires_sole_owner() {
        let mut ptr = RefPtr::counted(5_u32);
        **ptr.get_mut().unwrap() += 1;
        assert_eq!(**ptr, 6);

        let other = ptr.clone();
        assert!(ptr.get_mut().is_none());
        drop(other);
        assert!(ptr.get_mut().is_some());

        let mut null: RefPtr<Counted<u32>> = RefPtr::null();
        assert!(null.get_mut().is_none());
    }

    #[test]
    fn test_swap_and_equality() {
        let mut a = RefPtr::counted(1_u8);
        let mut b = RefPtr::counted(2_u8);
        let a_copy = a.clone();
        a.swap(&mut b);
        assert_eq!(b, a_copy);
        assert_ne!(a, a_copy);
        assert_eq!(a.strong_count(), 1);
        assert_eq!(b.strong_count(), 2);
    }
}
