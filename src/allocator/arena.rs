//! A dead simple "bump allocator".
//!
//! The arena hands out consecutive slices of a caller-provided region of memory, and never reuses them: deallocation is
//! a no-op, and memory is only reclaimed when the region itself goes out of scope.
//!
//! The arena itself holds the watermark, hence containers should use `&Arena` as their allocator, so that all copies
//! share the same watermark.

use core::{alloc::Layout, cell::Cell, fmt, marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

use crate::{error::AllocError, interface::Allocator};

/// A bump allocator over a borrowed region of memory.
pub struct Arena<'a> {
    watermark: Cell<usize>,
    start: NonNull<u8>,
    size: usize,
    _marker: PhantomData<&'a mut [MaybeUninit<u8>]>,
}

impl<'a> Arena<'a> {
    /// Creates an arena handing out the bytes of `region`.
    pub fn new(region: &'a mut [MaybeUninit<u8>]) -> Self {
        let size = region.len();
        let start = NonNull::from(region).cast();

        Self {
            watermark: Cell::new(0),
            start,
            size,
            _marker: PhantomData,
        }
    }

    /// Returns the total number of bytes of the region.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of bytes handed out so far, padding included.
    pub fn used(&self) -> usize {
        self.watermark.get()
    }

    /// Returns the number of bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.size - self.watermark.get()
    }

    //  Returns the offset of the block to allocate, and the new watermark, if it fits.
    fn compute_offset(&self, layout: Layout) -> Option<(usize, usize)> {
        let address = (self.start.as_ptr() as usize).checked_add(self.watermark.get())?;

        let padding = address.wrapping_neg() & (layout.align() - 1);

        let offset = self.watermark.get().checked_add(padding)?;
        let end = offset.checked_add(layout.size())?;

        (end <= self.size).then_some((offset, end))
    }
}

unsafe impl Allocator for Arena<'_> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let (offset, end) = self.compute_offset(layout).ok_or(AllocError::new(layout))?;

        self.watermark.set(end);

        //  Safety:
        //  -   `offset <= self.size`, as `offset <= end <= self.size`.
        let pointer = unsafe { self.start.as_ptr().add(offset) };

        //  Safety:
        //  -   `pointer` is non null, as it is derived from the non null `self.start` without wrapping.
        Ok(unsafe { NonNull::new_unchecked(pointer) })
    }

    #[inline(always)]
    unsafe fn deallocate(&self, _pointer: NonNull<u8>, _layout: Layout) {}
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Arena")
            .field("size", &self.size)
            .field("used", &self.used())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump() {
        let mut region = [MaybeUninit::<u8>::uninit(); 64];
        let arena = Arena::new(&mut region);

        let first = arena.allocate(Layout::new::<u8>()).unwrap();
        let second = arena.allocate(Layout::new::<u32>()).unwrap();

        assert_eq!(0, second.as_ptr() as usize % 4);
        assert!(second.as_ptr() > first.as_ptr());
        assert!(arena.used() >= 5);
        assert_eq!(64, arena.size());
        assert_eq!(arena.size() - arena.used(), arena.remaining());
    }

    #[test]
    fn exhausted() {
        let mut region = [MaybeUninit::<u8>::uninit(); 16];
        let arena = Arena::new(&mut region);

        let layout = Layout::new::<[u8; 12]>();

        arena.allocate(layout).unwrap();

        assert_eq!(Err(AllocError::new(layout)), arena.allocate(layout));
        assert_eq!(12, arena.used());
    }
}
