//! A typed block, counted in elements rather than bytes.

use core::{alloc::Layout, fmt, ptr::NonNull};

use crate::{alloc::capacity_exceeded, error::AllocError, interface::Allocator};

/// A block of memory able to hold `capacity` instances of `T`.
///
/// A block does not know which allocator it was obtained from, nor whether its slots are initialized: it is the
/// responsibility of the owner to deallocate it with the right allocator, exactly once, after dropping any live
/// element. As a safeguard, a block cannot be copied, and deallocating consumes it.
///
/// Blocks whose layout is zero-sized -- either because `capacity` is 0, or because `T` is zero-sized -- are dangling,
/// and never reach the allocator.
pub struct TypedBlock<T> {
    pointer: NonNull<T>,
    capacity: usize,
}

impl<T> TypedBlock<T> {
    /// Creates a dangling block, of capacity 0.
    pub const fn dangling() -> Self {
        Self {
            pointer: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates a block able to hold `capacity` elements, from `allocator`.
    ///
    /// The elements are left uninitialized.
    ///
    /// #   Errors
    ///
    /// Returns an error if `allocator` cannot satisfy the request.
    ///
    /// #   Panics
    ///
    /// Panics if the size of the block would exceed `isize::MAX` bytes.
    pub fn allocate<A>(capacity: usize, allocator: &A) -> Result<Self, AllocError>
    where
        A: Allocator + ?Sized,
    {
        let layout = Self::layout_for(capacity);

        if layout.size() == 0 {
            let pointer = NonNull::dangling();

            return Ok(Self { pointer, capacity });
        }

        let pointer = allocator.allocate(layout)?.cast();

        Ok(Self { pointer, capacity })
    }

    /// Deallocates the block.
    ///
    /// #   Safety
    ///
    /// -   `self` must have been allocated by `allocator`, or a clone of it.
    /// -   Any element still live within the block is forgotten, not dropped.
    pub unsafe fn deallocate<A>(self, allocator: &A)
    where
        A: Allocator + ?Sized,
    {
        let layout = Self::layout_for(self.capacity);

        if layout.size() == 0 {
            return;
        }

        //  Safety:
        //  -   `self.pointer` was allocated by `allocator`, as per pre-conditions.
        //  -   `self.pointer` is still valid, as `self` is consumed, and cannot be copied.
        //  -   `layout` is the layout the block was allocated with, as `self.capacity` never changes.
        unsafe { allocator.deallocate(self.pointer.cast(), layout) };
    }

    /// Returns the number of elements the block can hold.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the layout of the block.
    pub fn layout(&self) -> Layout {
        Self::layout_for(self.capacity)
    }

    /// Returns a pointer to the first slot of the block.
    ///
    /// If the block is dangling, the pointer is only valid for zero-sized accesses.
    pub const fn as_ptr(&self) -> *mut T {
        self.pointer.as_ptr()
    }

    fn layout_for(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_exceeded())
    }
}

impl<T> fmt::Debug for TypedBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("TypedBlock")
            .field("pointer", &self.pointer)
            .field("capacity", &self.capacity)
            .finish()
    }
}
