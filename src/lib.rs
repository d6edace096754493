//! Allocator-parameterized containers.
//!
//! This crate provides a handful of containers -- a fixed-length array, a growable vector, a doubly-linked list, and a
//! minimal associative mapping -- each generic over the element type and over the `Allocator` supplying its memory.
//!
//! The `Allocator` trait is deliberately minimal: a block of memory is obtained with `allocate`, and released with
//! `deallocate`. Arena, pool, or tracking allocators can be substituted by implementing those two operations.
//!
//! None of the containers are safe for concurrent mutation. Any operation which may reallocate the backing block of a
//! container -- such as `push_back`, `insert`, or `resize` on `DynamicVector` -- invalidates all references, pointers,
//! and slices previously obtained from it; the borrow checker enforces this for safe code.

#![cfg_attr(not(test), no_std)]
//  Lints
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc as alloc_crate;

pub mod allocator;
pub mod collection;
pub mod error;
pub mod extension;
pub mod interface;

mod alloc;

pub use allocator::Global;
pub use collection::{Dictionary, DynamicVector, FixedArray, LinkedList};
pub use error::{AllocError, Error};
pub use interface::Allocator;
