//! Provides implementations of multiple allocators or allocator adapters.

mod arena;
mod failing;
mod global;
mod tracked;

pub use arena::Arena;
pub use failing::Failing;
pub use global::Global;
pub use tracked::{Ledger, Tracked};
