//! The failure paths of the infallible convenience APIs.

use crate::error::AllocError;

/// Signals an allocation failure to the global handler, which aborts or panics.
#[cold]
#[inline(never)]
pub(crate) fn handle_alloc_error(error: AllocError) -> ! {
    alloc_crate::alloc::handle_alloc_error(error.layout())
}

/// Signals that a requested capacity cannot be represented in memory.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn capacity_exceeded() -> ! {
    panic!("capacity overflow")
}
