//! A Dynamic Array.
//!
//! The elements live in a single block obtained from the allocator. Whenever an insertion would exceed the capacity
//! of the block, a new block `GROWTH_FACTOR` times as large is allocated, the elements are moved into it, and only
//! then is the old block released. Should the allocation fail, the vector is left untouched.
//!
//! Any operation which may reallocate -- `push_back`, `insert`, `reserve`, `resize`, `shrink_to_fit` -- invalidates all
//! pointers obtained from the vector, and all bounds previously computed from its capacity.

use core::{
    fmt,
    iter::FusedIterator,
    mem::{self, ManuallyDrop},
    ops, ptr,
    slice::{self, SliceIndex},
};

use crate::{
    alloc::{capacity_exceeded, handle_alloc_error},
    allocator::Global,
    collection::raw_array::RawArray,
    error::{AllocError, Error},
    interface::Allocator,
};

/// A dynamic array.
pub struct DynamicVector<T, A: Allocator = Global> {
    //  Type invariant:
    //  -   `self.length <= self.array.capacity()`.
    //  -   Slots in `0..self.length` are initialized.
    //  -   Slots in `self.length..` may be uninitialized.
    length: usize,
    array: RawArray<T, A>,
}

impl<T> DynamicVector<T> {
    /// Creates a new, empty, instance.
    ///
    /// No memory is allocated until the first element is inserted.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a new, empty, instance with exactly the specified capacity.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::with_capacity_in(capacity, Global)
    }
}

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Capacity of the first block allocated by a growing vector.
    pub const MIN_CAPACITY: usize = 8;

    /// Ratio between the capacities of successive blocks of a growing vector.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates a new, empty, instance.
    ///
    /// No memory is allocated until the first element is inserted.
    pub const fn new_in(allocator: A) -> Self {
        let length = 0;
        let array = RawArray::new_in(allocator);

        Self { length, array }
    }

    /// Creates a new, empty, instance with exactly the specified capacity.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        let length = 0;
        let array = RawArray::with_capacity_in(capacity, allocator)?;

        Ok(Self { length, array })
    }

    /// Creates a new instance holding clones of the elements of `elements`, with a capacity of `elements.len()`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_from_slice_in(elements: &[T], allocator: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut result = Self::with_capacity_in(elements.len(), allocator)?;

        for element in elements {
            result.push_within_capacity(element.clone());
        }

        Ok(result)
    }
}

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Returns whether the vector is empty.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of elements in the vector.
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the number of elements the vector can hold without reallocating.
    pub const fn capacity(&self) -> usize {
        self.array.capacity()
    }

    /// Returns a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        self.array.allocator()
    }

    /// Returns a raw pointer to the vector's block.
    ///
    /// If the vector didn't allocate yet, that is, if its capacity is 0, this pointer is dangling, and valid for zero
    /// sized reads. The pointer is invalidated by any reallocation.
    pub const fn as_ptr(&self) -> *const T {
        self.array.as_ptr()
    }

    /// Returns a raw pointer to the vector's block.
    ///
    /// If the vector didn't allocate yet, that is, if its capacity is 0, this pointer is dangling, and valid for zero
    /// sized reads. The pointer is invalidated by any reallocation.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.array.as_mut_ptr()
    }

    /// Returns a slice of the elements of the vector.
    pub fn as_slice(&self) -> &[T] {
        debug_assert!(self.length <= self.capacity());

        //  Safety:
        //  -   The pointer is non-null and aligned, even when dangling.
        //  -   Slots in `0..self.length` are initialized, as per type invariant.
        //  -   `self` is borrowed immutably for the lifetime of the result.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.length) }
    }

    /// Returns a mutable slice of the elements of the vector.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        debug_assert!(self.length <= self.capacity());

        let length = self.length;

        //  Safety:
        //  -   The pointer is non-null and aligned, even when dangling.
        //  -   Slots in `0..self.length` are initialized, as per type invariant.
        //  -   `self` is borrowed mutably for the lifetime of the result.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), length) }
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

//
//  Access
//

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Returns a reference to the element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let length = self.length;

        self.get(index).ok_or(Error::OutOfRange { index, length })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let length = self.length;

        self.get_mut(index).ok_or(Error::OutOfRange { index, length })
    }

    /// Returns a reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.length);

        //  Safety:
        //  -   `index < self.length`, as per pre-conditions.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.length);

        //  Safety:
        //  -   `index < self.length`, as per pre-conditions.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Returns the index of the first element equal to `value`, if any.
    ///
    /// This is a linear scan, in *O*(n).
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    /// Returns whether an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }
}

//
//  Capacity
//

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Reserves capacity for at least `additional` more elements.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails, in which case `self` is unmodified.
    ///
    /// #   Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        if additional <= self.capacity() - self.length {
            return Ok(());
        }

        self.grow_for(additional)
    }

    /// Reallocates to exactly `new_capacity`.
    ///
    /// The first `min(self.len(), new_capacity)` elements are moved, in order, to the new block. If `new_capacity` is
    /// less than `self.len()`, the excess elements are dropped and the length is reduced to `new_capacity`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails, in which case `self` is unmodified.
    ///
    /// #   Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity == self.capacity() {
            return Ok(());
        }

        let block = self.array.allocate_block(new_capacity)?;

        self.truncate(new_capacity);

        //  Safety:
        //  -   `block` was allocated by `self.array.allocate_block`.
        //  -   `self.length <= self.capacity()`, as per type invariant.
        //  -   `self.length <= new_capacity`, following truncation.
        //  -   Slots in `0..self.length` are initialized, as per type invariant.
        unsafe { self.array.replace(block, self.length) };

        Ok(())
    }

    /// Reallocates to exactly `self.len()`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails, in which case `self` is unmodified.
    pub fn shrink_to_fit(&mut self) -> Result<(), AllocError> {
        self.resize(self.length)
    }
}

//
//  Modification
//

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Appends an element at the back of the vector, unless memory allocation fails.
    ///
    /// #   Errors
    ///
    /// Returns an error if growing the vector fails, in which case `self` is unmodified and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        if self.length == self.capacity() {
            self.grow_for(1)?;
        }

        self.push_within_capacity(value);

        Ok(())
    }

    /// Appends an element at the back of the vector.
    ///
    /// #   Panics
    ///
    /// Calls the allocation error handler if memory allocation fails.
    pub fn push_back(&mut self, value: T) {
        if let Err(error) = self.try_push_back(value) {
            handle_alloc_error(error)
        }
    }

    /// Inserts an element at `index`, shifting all elements after it to the right, unless memory allocation fails.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index > self.len()`, and `Error::Allocation` if growing the vector fails; in
    /// either case `self` is unmodified and `value` is dropped.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        let length = self.length;

        if index > length {
            return Err(Error::OutOfRange { index, length });
        }

        if length == self.capacity() {
            self.grow_for(1)?;
        }

        let base = self.as_mut_ptr();

        //  Safety:
        //  -   `index <= length < self.capacity()`, hence `slot` and `slot + 1` are within the block.
        let slot = unsafe { base.add(index) };

        //  Safety:
        //  -   Slots in `index..length` are initialized, as per type invariant.
        //  -   Slots in `(index + 1)..(length + 1)` are within the block, as `length < self.capacity()`.
        //  -   `ptr::copy` handles overlapping ranges, as if copying from the back.
        unsafe { ptr::copy(slot, slot.add(1), length - index) };

        //  Safety:
        //  -   `slot` is within the block, and its previous value was moved out above.
        unsafe { ptr::write(slot, value) };

        self.length += 1;

        Ok(())
    }

    /// Inserts an element at `index`, shifting all elements after it to the right.
    ///
    /// #   Panics
    ///
    /// Panics if `index > self.len()`, and calls the allocation error handler if memory allocation fails.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(()) => (),
            Err(Error::Allocation(error)) => handle_alloc_error(error),
            Err(error) => panic!("{error}"),
        }
    }

    /// Removes the last element from this vector and returns it, if any.
    ///
    /// The slot vacated is left as is, and becomes part of the spare capacity.
    pub fn pop_back(&mut self) -> Option<T> {
        debug_assert!(self.length <= self.capacity());

        if self.is_empty() {
            return None;
        }

        self.length -= 1;

        //  Safety:
        //  -   `self.length < self.capacity()`, hence the slot is within the block.
        let slot = unsafe { self.as_ptr().add(self.length) };

        //  Safety:
        //  -   `slot` is well-aligned.
        //  -   `slot` is initialized, as it was within `0..self.length` prior to the decrement.
        //  -   `slot` is no longer considered initialized, hence will not be read again.
        Some(unsafe { ptr::read(slot) })
    }

    /// Removes the element at `index`, shifting all elements after it to the left, and returns it.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        let length = self.length;

        if index >= length {
            return Err(Error::OutOfRange { index, length });
        }

        //  Safety:
        //  -   `index < length <= self.capacity()`.
        let slot = unsafe { self.as_mut_ptr().add(index) };

        //  Safety:
        //  -   `slot` is initialized, as `index < self.length`.
        let element = unsafe { ptr::read(slot) };

        //  Safety:
        //  -   Slots in `(index + 1)..length` are initialized, as per type invariant.
        //  -   `ptr::copy` handles overlapping ranges.
        unsafe { ptr::copy(slot.add(1), slot, length - index - 1) };

        self.length -= 1;

        Ok(element)
    }

    /// Clears the vector, removing all values.
    ///
    /// The capacity of the vector is left unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

impl<T, A: Allocator> DynamicVector<T, A> {
    /// Clones the vector, including its allocator, into a block of the same capacity.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        let mut result = Self::with_capacity_in(self.capacity(), self.allocator().clone())?;

        for element in self {
            result.push_within_capacity(element.clone());
        }

        Ok(result)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for DynamicVector<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| handle_alloc_error(error))
    }
}

impl<T, A: Allocator + Default> Default for DynamicVector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for DynamicVector<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynamicVector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}

//
//  Comparison
//

impl<T, U, A, OA> PartialEq<DynamicVector<U, OA>> for DynamicVector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    OA: Allocator,
{
    fn eq(&self, other: &DynamicVector<U, OA>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for DynamicVector<T, A> {}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for DynamicVector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T, U, A> PartialEq<&[U]> for DynamicVector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

//
//  Indexing
//

impl<T, A: Allocator, I: SliceIndex<[T]>> ops::Index<I> for DynamicVector<T, A> {
    type Output = I::Output;

    #[track_caller]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, A: Allocator, I: SliceIndex<[T]>> ops::IndexMut<I> for DynamicVector<T, A> {
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

//
//  Iteration
//

impl<'a, T: 'a + Clone, A: Allocator> Extend<&'a T> for DynamicVector<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, A: Allocator> Extend<T> for DynamicVector<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();

        if let Err(error) = self.reserve(iter.size_hint().0) {
            handle_alloc_error(error)
        }

        for element in iter {
            self.push_back(element);
        }
    }
}

impl<T, A: Allocator + Default> FromIterator<T> for DynamicVector<T, A> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = Self::default();
        result.extend(iter);

        result
    }
}

impl<T, A: Allocator> IntoIterator for DynamicVector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);

        //  Safety:
        //  -   `this.array` is valid for reads.
        //  -   `this` is never dropped, hence `this.array` is not used again.
        let array = unsafe { ptr::read(&this.array) };

        IntoIter {
            front: 0,
            back: this.length,
            array,
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynamicVector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynamicVector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator moving the elements out of a vector.
pub struct IntoIter<T, A: Allocator = Global> {
    //  Type invariant:
    //  -   `self.front <= self.back <= self.array.capacity()`.
    //  -   Slots in `self.front..self.back` are initialized, all others are not.
    front: usize,
    back: usize,
    array: RawArray<T, A>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        //  Safety:
        //  -   `self.front <= self.array.capacity()`, as per type invariant.
        let first = unsafe { self.array.as_ptr().add(self.front) };

        //  Safety:
        //  -   Slots in `self.front..self.back` are initialized, as per type invariant.
        unsafe { slice::from_raw_parts(first, self.back - self.front) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        //  Safety:
        //  -   `self.front < self.back <= self.array.capacity()`.
        //  -   The slot is initialized, and no longer considered so after the increment.
        let element = unsafe { ptr::read(self.array.as_ptr().add(self.front)) };

        self.front += 1;

        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;

        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;

        //  Safety:
        //  -   `self.back < self.array.capacity()`.
        //  -   The slot is initialized, and no longer considered so after the decrement.
        Some(unsafe { ptr::read(self.array.as_ptr().add(self.back)) })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        //  Safety:
        //  -   `self.front <= self.array.capacity()`, as per type invariant.
        let first = unsafe { self.array.as_mut_ptr().add(self.front) };

        let remaining = ptr::slice_from_raw_parts_mut(first, self.back - self.front);

        self.front = self.back;

        //  Safety:
        //  -   `remaining` points to initialized elements, as per type invariant.
        //  -   Those elements are no longer considered initialized, hence will not be dropped again.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

//
//  Implementation
//

impl<T, A: Allocator> DynamicVector<T, A> {
    //  Drops the elements in `new_length..self.length`, if any.
    fn truncate(&mut self, new_length: usize) {
        if new_length >= self.length {
            return;
        }

        //  Reduce the length first, so that a panicking destructor leaks rather than double-drops.
        let length = mem::replace(&mut self.length, new_length);

        //  Safety:
        //  -   `new_length < length <= self.capacity()`.
        let first = unsafe { self.as_mut_ptr().add(new_length) };

        let tail = ptr::slice_from_raw_parts_mut(first, length - new_length);

        //  Safety:
        //  -   `tail` is properly aligned, and non-null.
        //  -   `tail` is valid for both reads and writes.
        //  -   `tail` points to initialized elements, which are no longer considered so.
        unsafe { ptr::drop_in_place(tail) };
    }

    //  Releases ownership of the block and of its elements, which must fill it entirely.
    pub(crate) fn into_raw_array(self) -> RawArray<T, A> {
        assert_eq!(self.length, self.capacity());

        let this = ManuallyDrop::new(self);

        //  Safety:
        //  -   `this.array` is valid for reads.
        //  -   `this` is never dropped, hence `this.array` is not used again.
        unsafe { ptr::read(&this.array) }
    }

    //  Appends `value`, which must fit in the current block.
    fn push_within_capacity(&mut self, value: T) {
        assert!(self.length < self.capacity());

        //  Safety:
        //  -   `self.length < self.capacity()`, hence the slot is within the block.
        let slot = unsafe { self.as_mut_ptr().add(self.length) };

        //  Safety:
        //  -   `slot` is well aligned.
        //  -   `slot` is valid for writes, and uninitialized, as per type invariant.
        unsafe { ptr::write(slot, value) };

        self.length += 1;
    }

    #[inline(never)]
    fn grow_for(&mut self, additional: usize) -> Result<(), AllocError> {
        let Some(target_capacity) = self.length.checked_add(additional) else {
            capacity_exceeded()
        };

        //  The caller shouldn't have called...
        if target_capacity <= self.capacity() {
            return Ok(());
        }

        let target_capacity = Self::round_up_capacity(self.capacity(), target_capacity);

        //  Safety:
        //  -   `self.length <= self.capacity()`, as per type invariant.
        //  -   `self.length < target_capacity`, as `additional > 0`.
        //  -   Slots in `0..self.length` are initialized, as per type invariant.
        unsafe { self.array.reallocate(target_capacity, self.length) }
    }

    //  Geometric growth: the total number of moves performed by `n` consecutive pushes is in *O*(n).
    const fn round_up_capacity(current: usize, min_capacity: usize) -> usize {
        let grown = current.saturating_mul(Self::GROWTH_FACTOR);

        let capacity = if grown > min_capacity { grown } else { min_capacity };

        if capacity > Self::MIN_CAPACITY {
            capacity
        } else {
            Self::MIN_CAPACITY
        }
    }
}
