//! An allocator which never succeeds.

use core::{alloc::Layout, ptr::NonNull};

use crate::{error::AllocError, interface::Allocator};

/// An allocator which fails every request.
///
/// Containers using it can only ever be empty; it is mostly useful to exercise allocation failure paths.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Failing;

unsafe impl Allocator for Failing {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        Err(AllocError::new(layout))
    }

    unsafe fn deallocate(&self, _pointer: NonNull<u8>, _layout: Layout) {
        panic!("Failing::deallocate called!")
    }
}
