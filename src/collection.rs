//! A variety of collections implemented in terms of `Allocator`.
//!
//! `DynamicVector` is the workhorse: `Dictionary` is built from two of them, and `LinkedList` keeps its nodes in one.

pub mod dictionary;
pub mod dynamic_vector;
pub mod fixed_array;
pub mod linked_list;

mod raw_array;

pub use dictionary::Dictionary;
pub use dynamic_vector::DynamicVector;
pub use fixed_array::FixedArray;
pub use linked_list::LinkedList;
