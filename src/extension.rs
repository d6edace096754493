//! Extensions over the raw `Allocator` API, for greater type safety.

mod typed_block;

pub use typed_block::TypedBlock;
