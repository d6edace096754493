//! A Linked List.
//!
//! The nodes of the list live in the slots of a single `DynamicVector`, and link to one another by slot index. A slot
//! vacated by a removal is chained onto a free list, and reused by the next insertion, so that a list which does not
//! grow beyond its previous length does not allocate.

use core::{fmt, iter::FusedIterator, mem};

use crate::{
    alloc::handle_alloc_error,
    allocator::Global,
    collection::DynamicVector,
    error::{AllocError, Error},
    interface::Allocator,
};

/// A doubly-linked list.
pub struct LinkedList<T, A: Allocator = Global> {
    //  Invariants:
    //  -   `length` is the number of occupied slots.
    //  -   `head` and `tail` are `None` if and only if `length` is 0.
    //  -   `head.prev` and `tail.next` are `None`.
    //  -   For any two consecutive nodes `a` and `b`, `a.next == b` and `b.prev == a`.
    length: usize,
    head: Option<usize>,
    tail: Option<usize>,
    //  First vacant slot, each vacant slot linking to the next.
    free: Option<usize>,
    slots: DynamicVector<Slot<T>, A>,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty, list.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Creates a new, empty, list with the specified `allocator`.
    ///
    /// No memory is allocated until the first element is inserted.
    pub const fn new_in(allocator: A) -> Self {
        let slots = DynamicVector::new_in(allocator);

        Self::from_slots(slots)
    }

    /// Returns whether the list is empty, or not.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of elements in the list.
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    /// Returns the position of the first element equal to `element`, if any.
    pub fn find(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|e| e == element)
    }

    /// Returns whether the list contains `element`, or not.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(element).is_some()
    }

    /// Clears the list, removing every element.
    ///
    /// The slots are kept for future insertions.
    pub fn clear(&mut self) {
        self.slots.clear();

        self.length = 0;
        self.head = None;
        self.tail = None;
        self.free = None;
    }

    /// Returns an iterator over the elements, from front to back.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter(self.links())
    }
}

//
//  Access
//

impl<T, A: Allocator> LinkedList<T, A> {
    /// Returns a reference to the front element, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|head| &self.node(head).element)
    }

    /// Returns a mutable reference to the front element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;

        Some(&mut self.node_mut(head).element)
    }

    /// Returns a reference to the back element, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|tail| &self.node(tail).element)
    }

    /// Returns a mutable reference to the back element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.tail?;

        Some(&mut self.node_mut(tail).element)
    }

    /// Returns a reference to the element at `index`, if any.
    ///
    /// The list is walked from whichever end is closest.
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slot_of(index)?;

        Some(&self.node(slot).element)
    }

    /// Returns a mutable reference to the element at `index`, if any.
    ///
    /// The list is walked from whichever end is closest.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot_of(index)?;

        Some(&mut self.node_mut(slot).element)
    }
}

//
//  Modification
//

impl<T, A: Allocator> LinkedList<T, A> {
    /// Appends `element` at the back of the list.
    ///
    /// #   Panics
    ///
    /// Calls the allocation error handler if memory allocation fails.
    pub fn add(&mut self, element: T) {
        if let Err(error) = self.try_push_back(element) {
            handle_alloc_error(error)
        }
    }

    /// Prepends `element` at the front of the list.
    ///
    /// #   Panics
    ///
    /// Calls the allocation error handler if memory allocation fails.
    pub fn push_front(&mut self, element: T) {
        if let Err(error) = self.try_push_front(element) {
            handle_alloc_error(error)
        }
    }

    /// Appends `element` at the back of the list, unless memory allocation fails.
    ///
    /// #   Errors
    ///
    /// Returns an error if no slot can be allocated, in which case the list is unmodified and `element` is dropped.
    pub fn try_push_back(&mut self, element: T) -> Result<(), AllocError> {
        let tail = self.tail;
        let index = self.allocate_node(element, tail, None)?;

        match tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }

        self.tail = Some(index);
        self.length += 1;

        Ok(())
    }

    /// Prepends `element` at the front of the list, unless memory allocation fails.
    ///
    /// #   Errors
    ///
    /// Returns an error if no slot can be allocated, in which case the list is unmodified and `element` is dropped.
    pub fn try_push_front(&mut self, element: T) -> Result<(), AllocError> {
        let head = self.head;
        let index = self.allocate_node(element, None, head)?;

        match head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }

        self.head = Some(index);
        self.length += 1;

        Ok(())
    }

    /// Inserts `element` so that it ends up at position `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index > self.len()`, and `Error::Allocation` if no slot can be allocated; in
    /// either case the list is unmodified and `element` is dropped.
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<(), Error> {
        let length = self.length;

        if index > length {
            return Err(Error::OutOfRange { index, length });
        }

        let Some(next) = self.slot_of(index) else {
            self.try_push_back(element)?;

            return Ok(());
        };

        let prev = self.node(next).prev;
        let inserted = self.allocate_node(element, prev, Some(next))?;

        self.node_mut(next).prev = Some(inserted);

        match prev {
            Some(prev) => self.node_mut(prev).next = Some(inserted),
            None => self.head = Some(inserted),
        }

        self.length += 1;

        Ok(())
    }

    /// Inserts `element` so that it ends up at position `index`, first padding the list with default values if
    /// `index` lies beyond its back.
    ///
    /// After a successful call, the list holds at least `index + 1` elements. Each padding element costs a node: a
    /// large `index` on a short list is correspondingly expensive.
    ///
    /// #   Errors
    ///
    /// Returns an error if a slot cannot be allocated. Padding elements appended before the failure are kept.
    pub fn insert_padded(&mut self, index: usize, element: T) -> Result<(), AllocError>
    where
        T: Default,
    {
        while self.length < index {
            self.try_push_back(T::default())?;
        }

        match self.try_insert(index, element) {
            Ok(()) => Ok(()),
            Err(Error::Allocation(error)) => Err(error),
            Err(error) => unreachable!("padded list rejected insertion: {error}"),
        }
    }

    /// Removes the front element and returns it, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;

        Some(self.unlink(head))
    }

    /// Removes the back element and returns it, if any.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;

        Some(self.unlink(tail))
    }

    /// Removes the element at `index` and returns it.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        let length = self.length;

        let slot = self.slot_of(index).ok_or(Error::OutOfRange { index, length })?;

        Ok(self.unlink(slot))
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Clones the list, including its allocator.
    ///
    /// The nodes of the clone occupy consecutive slots, in order, whatever the layout of `self`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        let slots = DynamicVector::with_capacity_in(self.length, self.allocator().clone())?;

        let mut result = Self::from_slots(slots);

        for element in self {
            result.try_push_back(element.clone())?;
        }

        Ok(result)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for LinkedList<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| handle_alloc_error(error))
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for LinkedList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator + Default> Default for LinkedList<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, U, A, OA> PartialEq<LinkedList<U, OA>> for LinkedList<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    OA: Allocator,
{
    fn eq(&self, other: &LinkedList<U, OA>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T: Eq, A: Allocator> Eq for LinkedList<T, A> {}

//
//  Iteration
//

impl<'a, T: 'a + Clone, A: Allocator> Extend<&'a T> for LinkedList<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, A: Allocator> Extend<T> for LinkedList<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T, A: Allocator + Default> FromIterator<T> for LinkedList<T, A> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = Self::default();

        result.extend(iter);

        result
    }
}

impl<T, A: Allocator> IntoIterator for LinkedList<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a LinkedList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator moving the elements out of a linked list.
pub struct IntoIter<T, A: Allocator = Global>(LinkedList<T, A>);

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

/// Iterator over a reference to a linked list.
pub struct Iter<'a, T, A: Allocator = Global>(Links<'a, T, A>);

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.0.list;

        self.0.next().map(|slot| &list.node(slot).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, T, A: Allocator> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let list = self.0.list;

        self.0.next_back().map(|slot| &list.node(slot).element)
    }
}

impl<T, A: Allocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Allocator> FusedIterator for Iter<'_, T, A> {}

//
//  Implementation
//

struct Node<T> {
    element: T,
    next: Option<usize>,
    prev: Option<usize>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

//  Iterator over the slots of the nodes of a list, in order.
struct Links<'a, T, A: Allocator> {
    //  Only `length` more slots are linked.
    length: usize,
    head: Option<usize>,
    tail: Option<usize>,
    list: &'a LinkedList<T, A>,
}

impl<T, A: Allocator> Iterator for Links<'_, T, A> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.length == 0 {
            return None;
        }

        let head = self.head?;

        self.head = self.list.node(head).next;
        self.length -= 1;

        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length, Some(self.length))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for Links<'_, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.length == 0 {
            return None;
        }

        let tail = self.tail?;

        self.tail = self.list.node(tail).prev;
        self.length -= 1;

        Some(tail)
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    const fn from_slots(slots: DynamicVector<Slot<T>, A>) -> Self {
        Self {
            length: 0,
            head: None,
            tail: None,
            free: None,
            slots,
        }
    }

    fn links(&self) -> Links<'_, T, A> {
        Links {
            length: self.length,
            head: self.head,
            tail: self.tail,
            list: self,
        }
    }

    //  Returns the slot of the n-th node, walking from the closest end.
    fn slot_of(&self, n: usize) -> Option<usize> {
        if n >= self.length {
            return None;
        }

        let mut links = self.links();

        if n <= self.length / 2 {
            links.nth(n)
        } else {
            links.nth_back(self.length - 1 - n)
        }
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {slot} is linked"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {slot} is linked"),
        }
    }

    //  Stores a node in a vacant slot, or a new one, and returns the slot. Links to the node are left to the caller.
    fn allocate_node(&mut self, element: T, prev: Option<usize>, next: Option<usize>) -> Result<usize, AllocError> {
        let node = Slot::Occupied(Node { element, next, prev });

        let Some(slot) = self.free else {
            self.slots.try_push_back(node)?;

            return Ok(self.slots.len() - 1);
        };

        let Slot::Vacant { next_free } = self.slots[slot] else {
            unreachable!("occupied slot {slot} is free")
        };

        self.free = next_free;
        self.slots[slot] = node;

        Ok(slot)
    }

    //  Unlinks the node in `slot`, vacates the slot, and returns the element.
    fn unlink(&mut self, slot: usize) -> T {
        let vacant = Slot::Vacant { next_free: self.free };

        let Slot::Occupied(Node { element, next, prev }) = mem::replace(&mut self.slots[slot], vacant) else {
            unreachable!("vacant slot {slot} is linked")
        };

        self.free = Some(slot);

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }

        self.length -= 1;

        //  Only vacant slots remain.
        if self.length == 0 {
            self.clear();
        }

        element
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::allocator::{Failing, Ledger, Tracked};

    use super::*;

    type TestList = LinkedList<String>;

    //  Checks the links against one another, in both directions.
    fn check_links<T, A: Allocator>(list: &LinkedList<T, A>) {
        let forward: Vec<_> = list.links().collect();
        let mut backward: Vec<_> = list.links().rev().collect();

        backward.reverse();

        assert_eq!(list.len(), forward.len());
        assert_eq!(forward, backward);
        assert_eq!(forward.first().copied(), list.head);
        assert_eq!(forward.last().copied(), list.tail);

        if let Some(head) = list.head {
            assert_eq!(None, list.node(head).prev);
        }

        if let Some(tail) = list.tail {
            assert_eq!(None, list.node(tail).next);
        }

        for pair in forward.windows(2) {
            assert_eq!(Some(pair[1]), list.node(pair[0]).next);
            assert_eq!(Some(pair[0]), list.node(pair[1]).prev);
        }
    }

    #[test]
    fn list_empty() {
        let list = TestList::new();

        assert!(list.is_empty());
        assert_eq!(0, list.len());
        assert_eq!(None, list.front());
        assert_eq!(None, list.back());
        assert_eq!(None, list.get(0));

        check_links(&list);
    }

    #[test]
    fn list_front() {
        let mut list = TestList::new();

        list.try_push_front(String::from("0")).unwrap();

        assert!(!list.is_empty());
        assert_eq!(1, list.len());
        assert_eq!(Some("0"), list.front().map(|s| s.as_str()));

        if let Some(e) = list.front_mut() {
            e.push('1');
        }

        assert_eq!(Some("01"), list.pop_front().as_deref());

        assert!(list.is_empty());
        assert_eq!(0, list.len());
    }

    #[test]
    fn list_front_multiple() {
        let mut list = TestList::new();

        list.try_push_front(String::from("2")).unwrap();
        list.try_push_front(String::from("1")).unwrap();
        list.try_push_front(String::from("0")).unwrap();

        check_links(&list);

        assert_eq!(3, list.len());
        assert_eq!(Some("0"), list.front().map(|s| s.as_str()));
        assert_eq!(Some("2"), list.back().map(|s| s.as_str()));
        assert_eq!(Some("0"), list.pop_front().as_deref());

        assert_eq!(2, list.len());
        assert_eq!(Some("1"), list.pop_front().as_deref());

        assert_eq!(1, list.len());
        assert_eq!(Some("2"), list.pop_front().as_deref());

        assert!(list.is_empty());
        assert_eq!(None, list.pop_front());
    }

    #[test]
    fn list_back() {
        let mut list = TestList::new();

        list.try_push_back(String::from("0")).unwrap();

        assert!(!list.is_empty());
        assert_eq!(1, list.len());
        assert_eq!(Some("0"), list.back().map(|s| s.as_str()));

        if let Some(e) = list.back_mut() {
            e.push('1');
        }

        assert_eq!(Some("01"), list.pop_back().as_deref());

        assert!(list.is_empty());
        assert_eq!(0, list.len());
    }

    #[test]
    fn list_back_multiple() {
        let mut list = TestList::new();

        list.add(String::from("2"));
        list.add(String::from("1"));
        list.add(String::from("0"));

        check_links(&list);

        assert_eq!(3, list.len());
        assert_eq!(Some("0"), list.back().map(|s| s.as_str()));
        assert_eq!(Some("2"), list.front().map(|s| s.as_str()));
        assert_eq!(Some("0"), list.pop_back().as_deref());

        assert_eq!(2, list.len());
        assert_eq!(Some("1"), list.pop_back().as_deref());

        assert_eq!(1, list.len());
        assert_eq!(Some("2"), list.pop_back().as_deref());

        assert!(list.is_empty());
        assert_eq!(None, list.pop_back());
    }

    #[test]
    fn list_get() {
        let mut list: LinkedList<i32> = (0..7).collect();

        for index in 0..7 {
            assert_eq!(Some(&(index as i32)), list.get(index));
        }

        assert_eq!(None, list.get(7));

        if let Some(e) = list.get_mut(5) {
            *e = 50;
        }

        assert_eq!("[0, 1, 2, 3, 4, 50, 6]", format!("{list:?}"));
    }

    #[test]
    fn list_add_remove() {
        let mut list = LinkedList::new();

        list.add(1);
        list.add(2);
        list.add(3);

        assert_eq!(Ok(2), list.remove(1));
        assert_eq!("[1, 3]", format!("{list:?}"));

        check_links(&list);

        assert_eq!(Err(Error::OutOfRange { index: 2, length: 2 }), list.remove(2));
        assert_eq!(Ok(1), list.remove(0));
        assert_eq!(Ok(3), list.remove(0));
        assert_eq!(Err(Error::OutOfRange { index: 0, length: 0 }), list.remove(0));

        check_links(&list);
    }

    #[test]
    fn list_insert() {
        let mut list = LinkedList::new();

        list.try_insert(0, 2).unwrap();
        list.try_insert(0, 0).unwrap();
        list.try_insert(1, 1).unwrap();
        list.try_insert(3, 4).unwrap();
        list.try_insert(3, 3).unwrap();

        assert_eq!("[0, 1, 2, 3, 4]", format!("{list:?}"));
        assert_eq!(Err(Error::OutOfRange { index: 6, length: 5 }), list.try_insert(6, 6));
        assert_eq!(5, list.len());

        check_links(&list);
    }

    #[test]
    fn list_insert_padded() {
        let mut list = LinkedList::new();

        list.insert_padded(3, 7).unwrap();

        assert_eq!("[0, 0, 0, 7]", format!("{list:?}"));

        list.insert_padded(1, 5).unwrap();

        assert_eq!("[0, 5, 0, 0, 7]", format!("{list:?}"));

        list.insert_padded(5, 9).unwrap();

        assert_eq!("[0, 5, 0, 0, 7, 9]", format!("{list:?}"));

        check_links(&list);
    }

    #[test]
    fn list_find() {
        let list: TestList = ["a", "b", "c", "b"].iter().map(|s| s.to_string()).collect();

        assert_eq!(Some(1), list.find(&String::from("b")));
        assert_eq!(None, list.find(&String::from("d")));
        assert!(list.contains(&String::from("c")));
        assert!(!list.contains(&String::from("e")));
    }

    #[test]
    fn list_clear() {
        let mut list: TestList = [0, 1, 2].iter().map(|i| i.to_string()).collect();

        list.clear();

        assert!(list.is_empty());
        assert_eq!("[]", format!("{list:?}"));

        list.add(String::from("3"));

        assert_eq!(r#"["3"]"#, format!("{list:?}"));

        check_links(&list);
    }

    #[test]
    fn list_reuses_slots() {
        let ledger = Ledger::new();

        {
            let mut list = LinkedList::new_in(Tracked::new(Global, &ledger));

            for i in 0..8 {
                list.try_push_back(i).unwrap();
            }

            assert_eq!(1, ledger.allocations());

            for _ in 0..4 {
                list.pop_front();
            }

            for i in 8..12 {
                list.try_push_back(i).unwrap();
            }

            assert_eq!(1, ledger.allocations());
            assert_eq!("[4, 5, 6, 7, 8, 9, 10, 11]", format!("{list:?}"));

            check_links(&list);
        }

        assert_eq!(0, ledger.live_blocks());
    }

    #[test]
    fn list_allocation_failure() {
        let mut list = LinkedList::new_in(Failing);

        assert!(list.try_push_back(1).is_err());
        assert!(list.try_push_front(1).is_err());
        assert!(matches!(list.try_insert(0, 1), Err(Error::Allocation(_))));
        assert!(list.insert_padded(2, 1).is_err());

        assert!(list.is_empty());

        check_links(&list);
    }

    #[test]
    fn list_clone() {
        let mut list = TestList::new();

        list.try_push_front(String::from("2")).unwrap();
        list.try_push_front(String::from("1")).unwrap();
        list.try_push_front(String::from("0")).unwrap();

        let mut clone = list.clone();

        check_links(&clone);

        assert_eq!(Some("0"), clone.pop_front().as_deref());
        assert_eq!(Some("1"), clone.pop_front().as_deref());
        assert_eq!(Some("2"), clone.pop_front().as_deref());
        assert_eq!(None, clone.pop_front().as_deref());

        assert_eq!(Some("0"), list.pop_front().as_deref());
        assert_eq!(Some("1"), list.pop_front().as_deref());
        assert_eq!(Some("2"), list.pop_front().as_deref());
        assert_eq!(None, list.pop_front().as_deref());
    }

    #[test]
    fn list_comparison() {
        let one: TestList = [0, 1, 2].iter().map(|i| i.to_string()).collect();
        let two: TestList = [0, 1, 3].iter().map(|i| i.to_string()).collect();
        let three: TestList = [0, 1].iter().map(|i| i.to_string()).collect();

        assert_eq!(one, one);
        assert_ne!(one, two);
        assert_ne!(one, three);
        assert_eq!(two, two);
    }

    #[test]
    fn list_extend_clone() {
        let mut list: TestList = [0, 1, 2].iter().map(|i| i.to_string()).collect();

        list.extend(&[String::from("3"), String::from("4"), String::from("5")]);

        assert_eq!(r#"["0", "1", "2", "3", "4", "5"]"#, format!("{list:?}"));
    }

    #[test]
    fn list_extend() {
        let mut list: TestList = [0, 1, 2].iter().map(|i| i.to_string()).collect();

        list.extend([String::from("3"), String::from("4"), String::from("5")]);

        assert_eq!(r#"["0", "1", "2", "3", "4", "5"]"#, format!("{list:?}"));
    }

    #[test]
    fn list_into_iter() {
        let list: TestList = [0, 1, 2, 3].iter().map(|i| i.to_string()).collect();

        let mut iter = list.into_iter();

        assert_eq!(4, iter.len());
        assert_eq!(Some("3"), iter.next_back().as_deref());

        let v: Vec<_> = iter.collect();

        assert_eq!(r#"["0", "1", "2"]"#, format!("{v:?}"));
    }

    #[test]
    fn list_iter() {
        let list: TestList = [0, 1, 2].iter().map(|i| i.to_string()).collect();

        let v: Vec<_> = list.iter().collect();

        assert_eq!(r#"["0", "1", "2"]"#, format!("{v:?}"));

        let v: Vec<_> = list.iter().rev().collect();

        assert_eq!(r#"["2", "1", "0"]"#, format!("{v:?}"));

        let mut iter = list.iter();

        assert_eq!(Some("0"), iter.next().map(|s| s.as_str()));
        assert_eq!(Some("2"), iter.next_back().map(|s| s.as_str()));
        assert_eq!(Some("1"), iter.next().map(|s| s.as_str()));
        assert_eq!(None, iter.next_back());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn list_against_model() {
        for seed in 0..16 {
            let mut rng = oorandom::Rand32::new(seed);

            let mut list = LinkedList::new();
            let mut model = VecDeque::new();

            for _ in 0..256 {
                let length = model.len() as u32;

                match rng.rand_range(0..6) {
                    0 => {
                        let value = rng.rand_u32();

                        list.try_push_back(value).unwrap();
                        model.push_back(value);
                    }
                    1 => {
                        let value = rng.rand_u32();

                        list.try_push_front(value).unwrap();
                        model.push_front(value);
                    }
                    2 => assert_eq!(model.pop_front(), list.pop_front()),
                    3 => assert_eq!(model.pop_back(), list.pop_back()),
                    4 => {
                        let index = rng.rand_range(0..length + 1) as usize;
                        let value = rng.rand_u32();

                        list.try_insert(index, value).unwrap();
                        model.insert(index, value);
                    }
                    _ if length == 0 => assert!(list.remove(0).is_err()),
                    _ => {
                        let index = rng.rand_range(0..length) as usize;

                        assert_eq!(model.remove(index), list.remove(index).ok());
                    }
                }

                check_links(&list);

                assert_eq!(model.len(), list.len());
                assert!(model.iter().eq(list.iter()));
            }
        }
    }
}
