//! The `Allocator` trait itself, the capability every container draws its memory from.

use core::{alloc::Layout, ptr::NonNull};

use crate::error::AllocError;

/// A trait abstracting a source of memory blocks.
///
/// An allocator is a capability: it carries no state beyond what the caller supplied when creating it, and every
/// container embeds its own instance. Copying a container clones its allocator, hence allocators should be cheap to
/// clone, typically either zero-sized or a reference to the actual memory source.
///
/// #   Safety
///
/// Implementers must guarantee that:
///
/// -   A block returned by `allocate` is valid for reads and writes of `layout.size()` bytes, and aligned to at least
///     `layout.align()`.
/// -   A block remains valid until passed to `deallocate`, regardless of other calls to `allocate` or `deallocate`.
/// -   Clones of an allocator may deallocate the blocks allocated by the original, and vice-versa.
pub unsafe trait Allocator {
    /// Attempts to allocate a block of memory.
    ///
    /// `layout.size()` is never 0 when called from this crate; zero-sized requests are served without calling into the
    /// allocator.
    ///
    /// #   Errors
    ///
    /// Returning `Err` indicates that the underlying memory is exhausted, or cannot satisfy `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocates the block of memory pointed to by `pointer`.
    ///
    /// #   Safety
    ///
    /// -   `pointer` must have been returned by `allocate` on `self`, or a clone of `self`.
    /// -   `pointer` must not have been deallocated already.
    /// -   `layout` must be the layout `pointer` was allocated with.
    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout);
}

unsafe impl<A> Allocator for &A
where
    A: Allocator + ?Sized,
{
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        //  Safety:
        //  -   `pointer` was allocated by `**self`, as per the pre-conditions of `deallocate`.
        //  -   `layout` fits, as per the pre-conditions of `deallocate`.
        unsafe { (**self).deallocate(pointer, layout) }
    }
}
