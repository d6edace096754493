//! The process heap, as an `Allocator`.

use core::{
    alloc::Layout,
    ptr::{self, NonNull},
};

use alloc_crate::alloc;

use crate::{error::AllocError, interface::Allocator};

/// The global heap, as provided by the `alloc` crate.
///
/// This is the default allocator of all containers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout));
        }

        //  Safety:
        //  -   `layout.size()` is non-zero.
        let pointer = unsafe { alloc::alloc(layout) };

        NonNull::new(pointer).ok_or(AllocError::new(layout))
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        //  Safety:
        //  -   `pointer` was allocated by `alloc::alloc`, as per the pre-conditions of `deallocate`.
        //  -   `layout` is the layout it was allocated with, as per the pre-conditions of `deallocate`.
        unsafe { alloc::dealloc(pointer.as_ptr(), layout) }
    }
}

//  A well-aligned, non-null, pointer valid for zero-sized accesses, without provenance.
fn dangling(layout: Layout) -> NonNull<u8> {
    let pointer = ptr::null_mut::<u8>().wrapping_add(layout.align());

    //  Safety:
    //  -   `layout.align()` is a power of two, hence non-zero.
    unsafe { NonNull::new_unchecked(pointer) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_deallocate() {
        let layout = Layout::new::<[u64; 4]>();

        let pointer = Global.allocate(layout).unwrap();

        assert_eq!(0, pointer.as_ptr() as usize % layout.align());

        //  Safety:
        //  -   `pointer` is valid for writes of `layout.size()` bytes.
        unsafe { pointer.as_ptr().write_bytes(0xAB, layout.size()) };

        //  Safety:
        //  -   `pointer` was allocated by `Global`, with `layout`.
        unsafe { Global.deallocate(pointer, layout) };
    }

    #[test]
    fn allocate_zero_sized() {
        let layout = Layout::from_size_align(0, 16).unwrap();

        let pointer = Global.allocate(layout).unwrap();

        assert_eq!(16, pointer.as_ptr() as usize);

        //  Safety:
        //  -   `pointer` was allocated by `Global`, with `layout`.
        unsafe { Global.deallocate(pointer, layout) };

        let layout = Layout::from_size_align(0, 4096).unwrap();

        let pointer = Global.allocate(layout).unwrap();

        assert_eq!(0, pointer.as_ptr() as usize % layout.align());

        //  Safety:
        //  -   `pointer` was allocated by `Global`, with `layout`.
        unsafe { Global.deallocate(pointer, layout) };
    }
}
