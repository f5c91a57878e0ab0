//! A doubly linked list whose links are stored next to each element.
//!
//! [`IntrusiveList<T>`] keeps its elements in a slot arena. Each occupied slot
//! holds the element together with its `prev`/`next` links, so linking or
//! unlinking an element never allocates or frees a separate node. Links are
//! slot indices rather than addresses, which removes the possibility of a
//! dangling link.
//!
//! # Handles
//!
//! Inserting an element returns a [`Handle`], an opaque `(index, generation)`
//! pair. Every time a slot is vacated its generation is bumped, so a handle
//! to a removed element is detected as stale instead of silently addressing
//! whatever element reuses the slot later.
//!
//! # Ownership Policy
//!
//! The list owns its elements. [`remove`](IntrusiveList::remove),
//! [`pop_front`](IntrusiveList::pop_front) and
//! [`pop_back`](IntrusiveList::pop_back) unlink an element and return it to
//! the caller. [`clear`](IntrusiveList::clear) and dropping the list drop the
//! remaining elements. There is no operation that unlinks without returning
//! the element.
//!
//! # Concurrency
//!
//! The list is not internally synchronized. Every mutation takes `&mut self`,
//! so the borrow checker already rejects iteration concurrent with
//! mutation; sharing a list between threads requires an external lock.

mod iter;

use alloc::vec::Vec;
use core::ops::ControlFlow;

pub use self::iter::{Drain, Handles, IntoIter, Iter, IterMut};

/// An opaque reference to one element of an [`IntrusiveList`].
///
/// A handle stays valid until its element is removed from the list. After
/// that, operations on the handle return `None`.
///
/// Handles are only meaningful for the list that returned them. Using a
/// handle with another list is a logic error: it may address an unrelated
/// element or return `None`, but never causes undefined behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Index of the slot holding the element.
    index: u32,
    /// Generation of the slot at the time the element was inserted.
    generation: u32,
}

/// The links of one element.
struct Node<T> {
    /// The element itself.
    value: T,
    /// Slot index of the previous element, if any.
    prev: Option<u32>,
    /// Slot index of the next element, if any.
    next: Option<u32>,
}

/// Contents of a slot.
enum Entry<T> {
    /// The slot is free; it links to the next free slot.
    Vacant {
        /// Next slot on the free list.
        next_free: Option<u32>,
    },
    /// The slot holds a list member.
    Linked(Node<T>),
}

/// One slot of the arena.
struct Slot<T> {
    /// Bumped whenever the slot is vacated.
    generation: u32,
    /// What the slot currently holds.
    entry: Entry<T>,
}

impl<T> Slot<T> {
    /// Returns the node if the slot is occupied.
    #[inline]
    fn node(&self) -> Option<&Node<T>> {
        match &self.entry {
            Entry::Linked(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }

    /// Returns the node mutably if the slot is occupied.
    #[inline]
    fn node_mut(&mut self) -> Option<&mut Node<T>> {
        match &mut self.entry {
            Entry::Linked(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }
}

/// A doubly linked list of owned elements with O(1) insertion and removal
/// through [`Handle`]s.
///
/// # Examples
///
/// ```
/// use causeway_internals::IntrusiveList;
///
/// let mut list = IntrusiveList::new();
/// let a = list.push_back("a");
/// let b = list.push_back("b");
/// list.push_front("z");
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["z", "a", "b"]);
///
/// assert_eq!(list.remove(a), Some("a"));
/// assert_eq!(list.remove(a), None); // stale handle
/// assert_eq!(list.get(b), Some(&"b"));
/// assert_eq!(list.len(), 2);
/// ```
pub struct IntrusiveList<T> {
    /// The slot arena.
    slots: Vec<Slot<T>>,
    /// Head of the free slot list.
    free: Option<u32>,
    /// Slot index of the first element.
    first: Option<u32>,
    /// Slot index of the last element.
    last: Option<u32>,
    /// Number of linked elements.
    len: usize,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            first: None,
            last: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Returns the number of elements.
    ///
    /// This reads the maintained count and never walks the links.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element and returns its handle.
    pub fn push_back(&mut self, value: T) -> Handle {
        let handle = self.alloc(Node {
            value,
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(last) => self.node_at_mut(last).next = Some(handle.index),
            None => self.first = Some(handle.index),
        }
        self.last = Some(handle.index);
        self.len += 1;
        handle
    }

    /// Prepends an element and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let handle = self.alloc(Node {
            value,
            prev: None,
            next: self.first,
        });
        match self.first {
            Some(first) => self.node_at_mut(first).prev = Some(handle.index),
            None => self.last = Some(handle.index),
        }
        self.first = Some(handle.index);
        self.len += 1;
        handle
    }

    /// Unlinks the element behind `handle` and returns it.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.resolve(handle)?;
        Some(self.remove_at(handle.index))
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.first?;
        Some(self.remove_at(first))
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.last?;
        Some(self.remove_at(last))
    }

    /// Drops every element.
    ///
    /// Runs in time proportional to the number of elements. The slot storage
    /// is kept for reuse, and every outstanding handle becomes stale.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns `true` if `handle` refers to an element of this list.
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Returns the element behind `handle`.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let index = self.resolve(handle)?;
        Some(&self.node_at(index).value)
    }

    /// Returns the element behind `handle` mutably.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        Some(&mut self.node_at_mut(index).value)
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        Some(&self.node_at(self.first?).value)
    }

    /// Returns the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        Some(&self.node_at(self.last?).value)
    }

    /// Returns the first element mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.first?;
        Some(&mut self.node_at_mut(first).value)
    }

    /// Returns the last element mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.last?;
        Some(&mut self.node_at_mut(last).value)
    }

    /// Returns the handle of the first element.
    #[inline]
    pub fn first(&self) -> Option<Handle> {
        self.first.map(|index| self.handle_at(index))
    }

    /// Returns the handle of the last element.
    #[inline]
    pub fn last(&self) -> Option<Handle> {
        self.last.map(|index| self.handle_at(index))
    }

    /// Returns the handle of the element following `handle`.
    ///
    /// Returns `None` at the end of the list or for a stale handle.
    #[inline]
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle)?;
        let next = self.node_at(index).next?;
        Some(self.handle_at(next))
    }

    /// Returns the handle of the element preceding `handle`.
    ///
    /// Returns `None` at the start of the list or for a stale handle.
    #[inline]
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle)?;
        let prev = self.node_at(index).prev?;
        Some(self.handle_at(prev))
    }

    /// Moves the element behind `handle` to the end of the list.
    ///
    /// Returns `false` if the handle is stale. The handle stays valid.
    pub fn move_to_back(&mut self, handle: Handle) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };
        if self.last != Some(index) {
            self.unlink(index);
            let node = self.node_at_mut(index);
            node.prev = None;
            node.next = None;
            self.link_back(index);
        }
        true
    }

    /// Moves the element behind `handle` to the start of the list.
    ///
    /// Returns `false` if the handle is stale. The handle stays valid.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };
        if self.first != Some(index) {
            self.unlink(index);
            let node = self.node_at_mut(index);
            node.prev = None;
            node.next = None;
            self.link_front(index);
        }
        true
    }

    /// Returns the handle of the first element matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Handle> {
        self.handles()
            .find(|&handle| self.get(handle).is_some_and(&mut predicate))
    }

    /// Visits the elements front to back until `visit` breaks.
    ///
    /// Returns the break value, or `None` if every element was visited.
    pub fn for_each_until<B>(
        &self,
        mut visit: impl FnMut(Handle, &T) -> ControlFlow<B>,
    ) -> Option<B> {
        let mut cursor = self.first;
        while let Some(index) = cursor {
            let node = self.node_at(index);
            if let ControlFlow::Break(value) = visit(self.handle_at(index), &node.value) {
                return Some(value);
            }
            cursor = node.next;
        }
        None
    }

    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over mutable references to the elements, front to
    /// back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns an iterator over the handles of the elements, front to back.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T> {
        Handles::new(self)
    }

    /// Removes every element, yielding them front to back.
    ///
    /// Elements not consumed by the iterator are dropped when it is dropped.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Returns the occupied slot index for `handle`, if it is not stale.
    #[inline]
    fn resolve(&self, handle: Handle) -> Option<u32> {
        let slot = self.slots.get(handle.index as usize)?;
        (slot.generation == handle.generation && slot.node().is_some()).then_some(handle.index)
    }

    /// Builds the handle for an occupied slot.
    #[inline]
    fn handle_at(&self, index: u32) -> Handle {
        Handle {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Returns the node in an occupied slot.
    ///
    /// Only called with indices taken from the links, which always point to
    /// occupied slots.
    #[inline]
    fn node_at(&self, index: u32) -> &Node<T> {
        match self.slots[index as usize].node() {
            Some(node) => node,
            None => broken_link(),
        }
    }

    /// Returns the node in an occupied slot mutably.
    #[inline]
    fn node_at_mut(&mut self, index: u32) -> &mut Node<T> {
        match self.slots[index as usize].node_mut() {
            Some(node) => node,
            None => broken_link(),
        }
    }

    /// Places `node` in a free slot, growing the arena if needed.
    fn alloc(&mut self, node: Node<T>) -> Handle {
        if let Some(index) = self.free {
            let slot = &mut self.slots[index as usize];
            let Entry::Vacant { next_free } = slot.entry else {
                broken_link()
            };
            self.free = next_free;
            slot.entry = Entry::Linked(node);
            return Handle {
                index,
                generation: slot.generation,
            };
        }

        let Ok(index) = u32::try_from(self.slots.len()) else {
            capacity_overflow()
        };
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Linked(node),
        });
        Handle {
            index,
            generation: 0,
        }
    }

    /// Detaches the occupied slot `index` from its neighbours and from the
    /// endpoints, leaving its own links untouched.
    fn unlink(&mut self, index: u32) {
        let (prev, next) = {
            let node = self.node_at(index);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_at_mut(prev).next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.node_at_mut(next).prev = prev,
            None => self.last = prev,
        }
    }

    /// Links an unlinked occupied slot at the end.
    fn link_back(&mut self, index: u32) {
        let last = self.last;
        self.node_at_mut(index).prev = last;
        match last {
            Some(last) => self.node_at_mut(last).next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
    }

    /// Links an unlinked occupied slot at the start.
    fn link_front(&mut self, index: u32) {
        let first = self.first;
        self.node_at_mut(index).next = first;
        match first {
            Some(first) => self.node_at_mut(first).prev = Some(index),
            None => self.last = Some(index),
        }
        self.first = Some(index);
    }

    /// Unlinks the occupied slot `index`, vacates it and returns its value.
    fn remove_at(&mut self, index: u32) -> T {
        self.unlink(index);

        let slot = &mut self.slots[index as usize];
        let entry = core::mem::replace(
            &mut slot.entry,
            Entry::Vacant {
                next_free: self.free,
            },
        );
        slot.generation = slot.generation.wrapping_add(1);
        self.free = Some(index);
        self.len -= 1;

        match entry {
            Entry::Linked(node) => node.value,
            Entry::Vacant { .. } => broken_link(),
        }
    }
}

impl<T> Default for IntrusiveList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for IntrusiveList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for IntrusiveList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for IntrusiveList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> IntoIterator for IntrusiveList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a IntrusiveList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut IntrusiveList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Out-of-line panic for a link that points at a vacant slot.
///
/// Reaching this means the list's own invariants were broken; it cannot be
/// triggered through the public API.
#[cold]
#[inline(never)]
fn broken_link() -> ! {
    unreachable!("IntrusiveList link points at a vacant slot")
}

/// Out-of-line panic for more than `u32::MAX` slots.
#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("IntrusiveList capacity overflow")
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    /// Walks the links in both directions and checks them against `len`.
    fn assert_consistent<T>(list: &IntrusiveList<T>) {
        assert_eq!(list.first.is_none(), list.last.is_none());
        assert_eq!(list.first.is_none(), list.len == 0);

        let mut forward = 0;
        let mut cursor = list.first;
        let mut previous = None;
        while let Some(index) = cursor {
            let node = list.node_at(index);
            assert_eq!(node.prev, previous);
            previous = Some(index);
            cursor = node.next;
            forward += 1;
        }
        assert_eq!(previous, list.last);

        let mut backward = 0;
        let mut cursor = list.last;
        while let Some(index) = cursor {
            cursor = list.node_at(index).prev;
            backward += 1;
        }

        assert_eq!(forward, list.len);
        assert_eq!(backward, list.len);
    }

    #[test]
    fn test_push_and_remove_keep_links_consistent() {
        let mut list = IntrusiveList::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let handle = if i % 2 == 0 {
                list.push_back(i)
            } else {
                list.push_front(i)
            };
            handles.push(handle);
            assert_consistent(&list);
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [7, 5, 3, 1, 0, 2, 4, 6]);

        for handle in [handles[0], handles[7], handles[4], handles[1]] {
            assert!(list.remove(handle).is_some());
            assert_consistent(&list);
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [5, 3, 2, 6]);
    }

    #[test]
    fn test_erase_sole_element_empties_list() {
        let mut list = IntrusiveList::new();
        let only = list.push_back('x');
        assert_eq!(list.remove(only), Some('x'));
        assert!(list.is_empty());
        assert_eq!(list.first, None);
        assert_eq!(list.last, None);
        assert_consistent(&list);
    }

    #[test]
    fn test_slots_are_reused_with_new_generation() {
        let mut list = IntrusiveList::new();
        let old = list.push_back(1);
        list.remove(old);
        let new = list.push_back(2);

        assert_eq!(list.slots.len(), 1);
        assert_eq!(old.index, new.index);
        assert_ne!(old.generation, new.generation);
        assert_eq!(list.get(old), None);
        assert_eq!(list.get(new), Some(&2));
    }

    #[test]
    fn test_clear_keeps_storage_and_invalidates_handles() {
        let mut list: IntrusiveList<_> = (0..4).collect();
        let handles: Vec<_> = list.handles().collect();
        list.clear();
        assert_consistent(&list);
        assert_eq!(list.slots.len(), 4);
        assert!(handles.iter().all(|&handle| !list.contains(handle)));

        list.extend(vec![10, 11]);
        assert_eq!(list.slots.len(), 4);
        assert_consistent(&list);
    }

    #[test]
    fn test_move_to_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_to_back(a));
        assert_consistent(&list);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ['b', 'c', 'a']);

        assert!(list.move_to_front(c));
        assert_consistent(&list);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ['c', 'b', 'a']);

        assert!(list.move_to_front(c));
        assert!(list.move_to_back(a));
        assert_eq!(list.get(b), Some(&'b'));

        list.remove(b);
        assert!(!list.move_to_back(b));
        assert_consistent(&list);
    }
}
