//! Errors reported by allocators and containers.

use core::alloc::Layout;

use thiserror::Error;

/// The allocator could not satisfy a request.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("memory allocation of {} bytes failed", .layout.size())]
pub struct AllocError {
    layout: Layout,
}

impl AllocError {
    /// Creates an error for a request of `layout`.
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Returns the layout of the failed request.
    pub const fn layout(&self) -> Layout {
        self.layout
    }
}

/// Errors reported by the checked operations of the containers.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// A checked positional access was outside of `0..length`.
    #[error("index {index} is out of range for length {length}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the container at the time of the access.
        length: usize,
    },

    /// A dictionary lookup did not match any key.
    #[error("key not found")]
    KeyNotFound,

    /// The allocator could not satisfy a request.
    #[error(transparent)]
    Allocation(#[from] AllocError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_display() {
        let error = AllocError::new(Layout::new::<[u64; 4]>());

        assert_eq!("memory allocation of 32 bytes failed", error.to_string());
        assert_eq!(Layout::new::<[u64; 4]>(), error.layout());
    }

    #[test]
    fn error_display() {
        let out_of_range = Error::OutOfRange { index: 4, length: 3 };

        assert_eq!("index 4 is out of range for length 3", out_of_range.to_string());
        assert_eq!("key not found", Error::KeyNotFound.to_string());
    }

    #[test]
    fn error_from_alloc_error() {
        let error: Error = AllocError::new(Layout::new::<u8>()).into();

        assert_eq!(Error::Allocation(AllocError::new(Layout::new::<u8>())), error);
        assert_eq!("memory allocation of 1 bytes failed", error.to_string());
    }
}
