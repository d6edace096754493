//! The owned block shared by `FixedArray`, `DynamicVector`, and the owning iterators.
//!
//! A `RawArray` owns exactly one block and the allocator it came from; it releases the block on drop, but never drops
//! the elements within, which is the responsibility of its owner.

use core::{marker::PhantomData, ptr};

use crate::{error::AllocError, extension::TypedBlock, interface::Allocator};

pub(crate) struct RawArray<T, A: Allocator> {
    block: TypedBlock<T>,
    allocator: A,
    _marker: PhantomData<T>,
}

impl<T, A: Allocator> RawArray<T, A> {
    pub(crate) const fn new_in(allocator: A) -> Self {
        let block = TypedBlock::dangling();

        Self {
            block,
            allocator,
            _marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        let block = TypedBlock::allocate(capacity, &allocator)?;

        Ok(Self {
            block,
            allocator,
            _marker: PhantomData,
        })
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.block.capacity()
    }

    pub(crate) const fn allocator(&self) -> &A {
        &self.allocator
    }

    pub(crate) const fn as_ptr(&self) -> *const T {
        self.block.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.block.as_ptr()
    }

    //  Allocates a block suitable for `replace`, leaving `self` untouched.
    pub(crate) fn allocate_block(&self, capacity: usize) -> Result<TypedBlock<T>, AllocError> {
        TypedBlock::allocate(capacity, &self.allocator)
    }

    //  Moves the elements in `0..moved` to `block`, then releases the current block in favor of `block`.
    //
    //  #   Safety
    //
    //  -   `block` must have been allocated by `self.allocate_block`.
    //  -   `moved` must be less than or equal to both `self.capacity()` and `block.capacity()`.
    //  -   The slots in `0..moved` must be initialized; any other live element is forgotten.
    pub(crate) unsafe fn replace(&mut self, block: TypedBlock<T>, moved: usize) {
        debug_assert!(moved <= self.capacity());
        debug_assert!(moved <= block.capacity());

        //  Safety:
        //  -   The source is valid for reads of `moved` elements, as `moved <= self.capacity()`.
        //  -   The destination is valid for writes of `moved` elements, as `moved <= block.capacity()`.
        //  -   Both are properly aligned, being allocated for `T`.
        //  -   Both do not overlap, as `block` is freshly allocated.
        unsafe { ptr::copy_nonoverlapping(self.block.as_ptr(), block.as_ptr(), moved) };

        let previous = core::mem::replace(&mut self.block, block);

        //  Safety:
        //  -   `previous` was allocated by `self.allocator`, as per type invariant.
        //  -   Its elements were moved out above.
        unsafe { previous.deallocate(&self.allocator) };
    }

    //  Reallocates to exactly `capacity`, moving the elements in `0..moved`.
    //
    //  On failure, `self` is left untouched.
    //
    //  #   Safety
    //
    //  -   `moved` must be less than or equal to both `self.capacity()` and `capacity`.
    //  -   The slots in `0..moved` must be initialized; any other live element is forgotten.
    pub(crate) unsafe fn reallocate(&mut self, capacity: usize, moved: usize) -> Result<(), AllocError> {
        let block = self.allocate_block(capacity)?;

        //  Safety:
        //  -   `block` was allocated by `self.allocate_block`.
        //  -   `moved <= self.capacity()` and `moved <= capacity`, as per pre-conditions.
        //  -   The slots in `0..moved` are initialized, as per pre-conditions.
        unsafe { self.replace(block, moved) };

        Ok(())
    }
}

impl<T, A: Allocator> Drop for RawArray<T, A> {
    fn drop(&mut self) {
        let block = core::mem::replace(&mut self.block, TypedBlock::dangling());

        //  Safety:
        //  -   `block` was allocated by `self.allocator`, as per type invariant.
        //  -   `block` will not be used after this point.
        unsafe { block.deallocate(&self.allocator) };
    }
}

//  Safety:
//  -   `RawArray` uniquely owns its block, as `Box` does.
unsafe impl<T: Send, A: Allocator + Send> Send for RawArray<T, A> {}

//  Safety:
//  -   `RawArray` only hands out shared access to its block through `&self`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawArray<T, A> {}
