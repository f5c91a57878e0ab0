//! Iterators over an [`IntrusiveList`].
//!
//! All iterators walk the `next` links from the first element and the `prev`
//! links from the last one, and stop after yielding exactly `len` elements,
//! so the two ends never cross.

use core::{iter::FusedIterator, marker::PhantomData};

use super::{Handle, IntrusiveList, Slot, broken_link};

/// Borrowing iterator over the elements of an [`IntrusiveList`].
///
/// Created by [`IntrusiveList::iter`].
#[must_use]
pub struct Iter<'a, T> {
    /// The list being traversed.
    list: &'a IntrusiveList<T>,
    /// Next slot to yield from the front.
    front: Option<u32>,
    /// Next slot to yield from the back.
    back: Option<u32>,
    /// Number of elements not yet yielded from either end.
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Starts a traversal of the whole list.
    pub(super) fn new(list: &'a IntrusiveList<T>) -> Self {
        Self {
            list,
            front: list.first,
            back: list.last,
            remaining: list.len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node_at(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node_at(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over the handles of an [`IntrusiveList`].
///
/// Created by [`IntrusiveList::handles`].
#[must_use]
pub struct Handles<'a, T> {
    /// The element iterator whose positions are reported.
    inner: Iter<'a, T>,
}

impl<'a, T> Handles<'a, T> {
    /// Starts a traversal of the whole list.
    pub(super) fn new(list: &'a IntrusiveList<T>) -> Self {
        Self {
            inner: Iter::new(list),
        }
    }
}

impl<T> Iterator for Handles<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let index = self.inner.front?;
        self.inner.next()?;
        Some(self.inner.list.handle_at(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Handles<'_, T> {
    fn next_back(&mut self) -> Option<Handle> {
        let index = self.inner.back?;
        self.inner.next_back()?;
        Some(self.inner.list.handle_at(index))
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}
impl<T> FusedIterator for Handles<'_, T> {}

/// Mutable iterator over the elements of an [`IntrusiveList`].
///
/// Created by [`IntrusiveList::iter_mut`].
#[must_use]
pub struct IterMut<'a, T> {
    /// Base of the slot arena of the borrowed list.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer comes from the `Vec` of a list that is mutably borrowed
    ///    for `'a`, so the arena is neither moved nor resized meanwhile.
    /// 2. `front`, `back` and `remaining` describe the not-yet-yielded part of
    ///    that list, so every index reached through them is in bounds,
    ///    occupied, and has not been yielded before.
    slots: *mut Slot<T>,
    /// Next slot to yield from the front.
    front: Option<u32>,
    /// Next slot to yield from the back.
    back: Option<u32>,
    /// Number of elements not yet yielded from either end.
    remaining: usize,
    /// Marker to behave like the `&'a mut T`s we hand out.
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: `IterMut` hands out `&mut T` to distinct elements, like
// `core::slice::IterMut`, so it is `Send` when `T` is.
unsafe impl<T: Send> Send for IterMut<'_, T> {}

// SAFETY: A shared `&IterMut` gives no access to the elements.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    /// Starts a mutable traversal of the whole list.
    pub(super) fn new(list: &'a mut IntrusiveList<T>) -> Self {
        Self {
            // SAFETY:
            // 1. `list` is mutably borrowed for `'a`.
            // 2. The indices below describe the whole list.
            slots: list.slots.as_mut_ptr(),
            front: list.first,
            back: list.last,
            remaining: list.len,
            _marker: PhantomData,
        }
    }

    /// Returns the element in slot `index` for the rest of `'a`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `index` was reached through `front` or `back` while `remaining` was
    ///    non-zero, and `remaining` is decremented after this call.
    unsafe fn node(&mut self, index: u32) -> (&'a mut T, Option<u32>, Option<u32>) {
        // SAFETY: `index` is in bounds of the arena (invariant 2, guaranteed by
        // the caller).
        let slot = unsafe { self.slots.add(index as usize) };

        // SAFETY: The slot is live for `'a` (invariant 1) and has not been
        // handed out before (invariant 2), so no other reference to it exists.
        let slot: &'a mut Slot<T> = unsafe { &mut *slot };

        match slot.node_mut() {
            Some(node) => (&mut node.value, node.prev, node.next),
            None => broken_link(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;

        // SAFETY: `index` comes from `front` and `remaining` is non-zero; it is
        // decremented right below.
        let (value, _, next) = unsafe { self.node(index) };
        self.front = next;
        self.remaining -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;

        // SAFETY: `index` comes from `back` and `remaining` is non-zero; it is
        // decremented right below.
        let (value, prev, _) = unsafe { self.node(index) };
        self.back = prev;
        self.remaining -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of an [`IntrusiveList`].
///
/// Created by [`IntrusiveList::into_iter`](IntoIterator::into_iter).
#[must_use]
pub struct IntoIter<T> {
    /// The list being consumed.
    list: IntrusiveList<T>,
}

impl<T> IntoIter<T> {
    /// Takes ownership of the list.
    pub(super) fn new(list: IntrusiveList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// Draining iterator over the elements of an [`IntrusiveList`].
///
/// Created by [`IntrusiveList::drain`]. The list is empty once the iterator
/// is dropped, whether or not it was fully consumed.
#[must_use]
pub struct Drain<'a, T> {
    /// The list being emptied.
    list: &'a mut IntrusiveList<T>,
}

impl<'a, T> Drain<'a, T> {
    /// Starts draining the list.
    pub(super) fn new(list: &'a mut IntrusiveList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.list.clear();
    }
}
