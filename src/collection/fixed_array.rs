//! A Fixed Array.
//!
//! The length of the array is chosen at construction, and never changes afterwards. The elements live in a single
//! block, exactly as large as the array, obtained from the allocator.

use core::{fmt, ops, ptr, slice};

use crate::{
    alloc::handle_alloc_error,
    allocator::Global,
    collection::{raw_array::RawArray, DynamicVector},
    error::{AllocError, Error},
    interface::Allocator,
};

/// An array of fixed length, allocated from `A`.
pub struct FixedArray<T, A: Allocator = Global> {
    //  Type invariant:
    //  -   All slots of `self.array` are initialized.
    array: RawArray<T, A>,
}

impl<T> FixedArray<T> {
    /// Creates an array of `length` default values.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_new(length: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::try_new_in(length, Global)
    }

    /// Creates an array of `length` elements, the first being `first`, and the others default values.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `length` is 0, and `Error::Allocation` if the allocation fails.
    pub fn try_with_first(length: usize, first: T) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::try_with_first_in(length, first, Global)
    }

    /// Creates an array holding clones of `elements`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_from_slice(elements: &[T]) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(elements, Global)
    }
}

impl<T, A: Allocator> FixedArray<T, A> {
    /// Creates an array of `length` default values.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_new_in(length: usize, allocator: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::try_from_fn_in(length, allocator, |_| T::default())
    }

    /// Creates an array of `length` elements, the first being `first`, and the others default values.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `length` is 0, and `Error::Allocation` if the allocation fails.
    pub fn try_with_first_in(length: usize, first: T, allocator: A) -> Result<Self, Error>
    where
        T: Default,
    {
        if length == 0 {
            return Err(Error::OutOfRange { index: 0, length });
        }

        let mut first = Some(first);

        let result = Self::try_from_fn_in(length, allocator, |_| first.take().unwrap_or_default())?;

        Ok(result)
    }

    /// Creates an array holding clones of `elements`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_from_slice_in(elements: &[T], allocator: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_fn_in(elements.len(), allocator, |index| elements[index].clone())
    }

    /// Creates an array of `length` elements, the i-th being `generator(i)`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_from_fn_in<F>(length: usize, allocator: A, mut generator: F) -> Result<Self, AllocError>
    where
        F: FnMut(usize) -> T,
    {
        let mut elements = DynamicVector::with_capacity_in(length, allocator)?;

        for index in 0..length {
            //  Cannot fail: the capacity is sufficient.
            elements.try_push_back(generator(index))?;
        }

        let array = elements.into_raw_array();

        Ok(Self { array })
    }
}

impl<T, A: Allocator> FixedArray<T, A> {
    /// Returns the number of elements of the array.
    pub const fn len(&self) -> usize {
        self.array.capacity()
    }

    /// Returns whether the array is empty.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        self.array.allocator()
    }

    /// Returns a slice of the elements of the array.
    pub fn as_slice(&self) -> &[T] {
        //  Safety:
        //  -   The pointer is non-null and aligned, even when dangling.
        //  -   All slots are initialized, as per type invariant.
        //  -   `self` is borrowed immutably for the lifetime of the result.
        unsafe { slice::from_raw_parts(self.array.as_ptr(), self.len()) }
    }

    /// Returns a mutable slice of the elements of the array.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let length = self.len();

        //  Safety:
        //  -   The pointer is non-null and aligned, even when dangling.
        //  -   All slots are initialized, as per type invariant.
        //  -   `self` is borrowed mutably for the lifetime of the result.
        unsafe { slice::from_raw_parts_mut(self.array.as_mut_ptr(), length) }
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let length = self.len();

        self.as_slice().get(index).ok_or(Error::OutOfRange { index, length })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Error::OutOfRange` if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let length = self.len();

        self.as_mut_slice().get_mut(index).ok_or(Error::OutOfRange { index, length })
    }

    /// Returns a reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());

        //  Safety:
        //  -   `index < self.len()`, as per pre-conditions.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   `index` must be less than `self.len()`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len());

        //  Safety:
        //  -   `index < self.len()`, as per pre-conditions.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Clones the array, including its allocator, into a fresh block.
    ///
    /// #   Errors
    ///
    /// Returns an error if the allocation fails.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        Self::try_from_slice_in(self.as_slice(), self.allocator().clone())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for FixedArray<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| handle_alloc_error(error))
    }

    fn clone_from(&mut self, source: &Self) {
        if self.len() == source.len() {
            self.as_mut_slice().clone_from_slice(source.as_slice());
        } else {
            *self = source.clone();
        }
    }
}

impl<T, A: Allocator> Drop for FixedArray<T, A> {
    fn drop(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();

        //  Safety:
        //  -   `elements` points to initialized elements, as per type invariant.
        //  -   The block is released right after, by `self.array`, without accessing the elements.
        unsafe { ptr::drop_in_place(elements) };
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for FixedArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}

//
//  Comparison
//

impl<T, U, A, OA> PartialEq<FixedArray<U, OA>> for FixedArray<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    OA: Allocator,
{
    fn eq(&self, other: &FixedArray<U, OA>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T: Eq, A: Allocator> Eq for FixedArray<T, A> {}

//
//  Indexing
//

impl<T, A: Allocator> ops::Index<usize> for FixedArray<T, A> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, A: Allocator> ops::IndexMut<usize> for FixedArray<T, A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

//
//  Iteration
//

impl<'a, T, A: Allocator> IntoIterator for &'a FixedArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut FixedArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::allocator::{Failing, Ledger, Tracked};

    use super::*;

    #[test]
    fn new_default() {
        let array = FixedArray::<i32>::try_new(4).unwrap();

        assert_eq!(4, array.len());
        assert!(!array.is_empty());
        assert_eq!([0, 0, 0, 0], array.as_slice());
    }

    #[test]
    fn new_empty() {
        let array = FixedArray::<i32, _>::try_new_in(0, Failing).unwrap();

        assert!(array.is_empty());
        assert_eq!("[]", format!("{array:?}"));
    }

    #[test]
    fn with_first() {
        let array = FixedArray::try_with_first(3, String::from("a")).unwrap();

        assert_eq!(["a", "", ""], array.as_slice());
        assert_eq!(
            Err(Error::OutOfRange { index: 0, length: 0 }),
            FixedArray::try_with_first(0, String::from("a"))
        );
    }

    #[test]
    fn from_slice() {
        let array = FixedArray::try_from_slice(&[1, 2, 3]).unwrap();

        assert_eq!(r#"[1, 2, 3]"#, format!("{array:?}"));
    }

    #[test]
    fn access() {
        let mut array = FixedArray::try_from_slice(&[1, 2, 3]).unwrap();

        array[0] = 10;
        *array.at_mut(1).unwrap() += 10;

        assert_eq!(Ok(&10), array.at(0));
        assert_eq!(Ok(&12), array.at(1));
        assert_eq!(Err(Error::OutOfRange { index: 3, length: 3 }), array.at(3));
        assert_eq!(3, array[2]);

        //  Safety:
        //  -   `2 < array.len()`.
        assert_eq!(3, unsafe { *array.get_unchecked(2) });

        for element in &mut array {
            *element *= 2;
        }

        assert_eq!([20, 24, 6], array.as_slice());
    }

    #[test]
    fn allocation_failure() {
        assert!(FixedArray::<u8, _>::try_new_in(3, Failing).is_err());
        assert!(matches!(
            FixedArray::try_with_first_in(3, 1u8, Failing),
            Err(Error::Allocation(_))
        ));
    }

    #[test]
    fn equality() {
        let one = FixedArray::try_from_slice(&[1, 2, 3]).unwrap();
        let two = FixedArray::try_from_slice(&[1, 2, 3]).unwrap();
        let three = FixedArray::try_from_slice(&[1, 2]).unwrap();
        let four = FixedArray::try_from_slice(&[1, 2, 4]).unwrap();

        assert_eq!(one, two);
        assert_ne!(one, three);
        assert_ne!(one, four);
    }

    #[test]
    fn clone_owns_its_block() {
        let ledger = Ledger::new();

        {
            let original = FixedArray::try_from_slice_in(&[1, 2, 3], Tracked::new(Global, &ledger)).unwrap();
            let mut copy = original.clone();

            copy[0] = 7;

            assert_eq!([1, 2, 3], original.as_slice());
            assert_eq!([7, 2, 3], copy.as_slice());
            assert_eq!(2, ledger.live_blocks());
        }

        assert_eq!(0, ledger.live_blocks());
    }

    #[test]
    fn clone_from() {
        let ledger = Ledger::new();
        let allocator = Tracked::new(Global, &ledger);

        let source = FixedArray::try_from_slice_in(&[1, 2, 3], allocator).unwrap();
        let mut same = FixedArray::try_new_in(3, allocator).unwrap();
        let mut other = FixedArray::try_new_in(5, allocator).unwrap();

        same.clone_from(&source);

        assert_eq!(3, ledger.allocations());

        other.clone_from(&source);

        assert_eq!(4, ledger.allocations());
        assert_eq!(3, ledger.live_blocks());
        assert_eq!(source, same);
        assert_eq!(source, other);
    }

    #[test]
    fn drop_elements() {
        #[derive(Default)]
        struct Droppy(Option<Rc<Cell<usize>>>);

        impl Drop for Droppy {
            fn drop(&mut self) {
                if let Some(counter) = &self.0 {
                    counter.set(counter.get() + 1);
                }
            }
        }

        let counter = Rc::new(Cell::new(0));

        {
            let array = FixedArray::try_with_first(3, Droppy(Some(counter.clone()))).unwrap();

            assert_eq!(3, array.len());
            assert_eq!(0, counter.get());
        }

        assert_eq!(1, counter.get());
    }
}
