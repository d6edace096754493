//! An allocator adapter recording every request into a `Ledger`.
//!
//! The ledger is owned by the caller, and shared by all clones of the adapter, so that the allocations of a container
//! and of all its copies are accounted for in a single place.

use core::{alloc::Layout, cell::Cell, fmt, ptr::NonNull};

use crate::{error::AllocError, interface::Allocator};

/// Accounting of the requests made through a `Tracked` allocator.
#[derive(Default)]
pub struct Ledger {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    failures: Cell<usize>,
    live_bytes: Cell<usize>,
    //  Maximum of `live_bytes`, if any.
    budget: Cell<Option<usize>>,
}

impl Ledger {
    /// Creates a new, empty, ledger without budget.
    pub const fn new() -> Self {
        Self::with_budget_impl(None)
    }

    /// Creates a new, empty, ledger refusing any allocation which would bring the live bytes above `budget`.
    pub const fn with_budget(budget: usize) -> Self {
        Self::with_budget_impl(Some(budget))
    }

    /// Replaces the budget; `None` lifts it.
    ///
    /// Lowering the budget below the current number of live bytes does not affect existing blocks, it only fails
    /// subsequent allocations.
    pub fn set_budget(&self, budget: Option<usize>) {
        self.budget.set(budget);
    }

    /// Returns the number of successful allocations.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Returns the number of deallocations.
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Returns the number of refused allocations.
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// Returns the number of blocks allocated, and not yet deallocated.
    pub fn live_blocks(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Returns the number of bytes allocated, and not yet deallocated.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    const fn with_budget_impl(budget: Option<usize>) -> Self {
        Self {
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
            failures: Cell::new(0),
            live_bytes: Cell::new(0),
            budget: Cell::new(budget),
        }
    }

    fn admits(&self, layout: Layout) -> bool {
        let Some(budget) = self.budget.get() else {
            return true;
        };

        self.live_bytes
            .get()
            .checked_add(layout.size())
            .is_some_and(|total| total <= budget)
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Ledger")
            .field("allocations", &self.allocations())
            .field("deallocations", &self.deallocations())
            .field("failures", &self.failures())
            .field("live_bytes", &self.live_bytes())
            .field("budget", &self.budget.get())
            .finish()
    }
}

/// An allocator adapter, recording the requests made to `A` in a `Ledger`.
#[derive(Clone, Copy, Debug)]
pub struct Tracked<'a, A> {
    allocator: A,
    ledger: &'a Ledger,
}

impl<'a, A> Tracked<'a, A> {
    /// Creates an adapter over `allocator`, recording into `ledger`.
    pub const fn new(allocator: A, ledger: &'a Ledger) -> Self {
        Self { allocator, ledger }
    }

    /// Returns the ledger.
    pub const fn ledger(&self) -> &'a Ledger {
        self.ledger
    }
}

unsafe impl<A> Allocator for Tracked<'_, A>
where
    A: Allocator,
{
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ledger = self.ledger;

        if !ledger.admits(layout) {
            ledger.failures.set(ledger.failures.get() + 1);

            return Err(AllocError::new(layout));
        }

        match self.allocator.allocate(layout) {
            Ok(pointer) => {
                ledger.allocations.set(ledger.allocations.get() + 1);
                ledger.live_bytes.set(ledger.live_bytes.get() + layout.size());

                Ok(pointer)
            }
            Err(error) => {
                ledger.failures.set(ledger.failures.get() + 1);

                Err(error)
            }
        }
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        let ledger = self.ledger;

        debug_assert!(ledger.live_blocks() > 0, "Deallocation without matching allocation");

        ledger.deallocations.set(ledger.deallocations.get() + 1);
        ledger.live_bytes.set(ledger.live_bytes.get() - layout.size());

        //  Safety:
        //  -   `pointer` was allocated by `self.allocator`, as per the pre-conditions of `deallocate`.
        //  -   `layout` fits, as per the pre-conditions of `deallocate`.
        unsafe { self.allocator.deallocate(pointer, layout) }
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::{Failing, Global};

    use super::*;

    #[test]
    fn ledger_balance() {
        let ledger = Ledger::new();
        let allocator = Tracked::new(Global, &ledger);

        let layout = Layout::new::<[u32; 8]>();

        let first = allocator.allocate(layout).unwrap();
        let second = allocator.allocate(layout).unwrap();

        assert_eq!(2, ledger.allocations());
        assert_eq!(2, ledger.live_blocks());
        assert_eq!(64, ledger.live_bytes());

        //  Safety:
        //  -   Both were allocated by `allocator`, with `layout`.
        unsafe {
            allocator.deallocate(first, layout);
            allocator.deallocate(second, layout);
        }

        assert_eq!(2, ledger.deallocations());
        assert_eq!(0, ledger.live_blocks());
        assert_eq!(0, ledger.live_bytes());
    }

    #[test]
    fn ledger_budget() {
        let ledger = Ledger::with_budget(48);
        let allocator = Tracked::new(Global, &ledger);

        let layout = Layout::new::<[u32; 8]>();

        let pointer = allocator.allocate(layout).unwrap();

        assert_eq!(Err(AllocError::new(layout)), allocator.allocate(layout));
        assert_eq!(1, ledger.failures());

        ledger.set_budget(None);

        let other = allocator.allocate(layout).unwrap();

        //  Safety:
        //  -   Both were allocated by `allocator`, with `layout`.
        unsafe {
            allocator.deallocate(pointer, layout);
            allocator.deallocate(other, layout);
        }

        assert_eq!(0, ledger.live_blocks());
    }

    #[test]
    fn ledger_inner_failure() {
        let ledger = Ledger::new();
        let allocator = Tracked::new(Failing, &ledger);

        assert!(allocator.allocate(Layout::new::<u8>()).is_err());

        assert_eq!(0, ledger.allocations());
        assert_eq!(1, ledger.failures());
    }

    #[test]
    fn ledger_debug() {
        let ledger = Ledger::with_budget(16);

        assert_eq!(
            "Ledger { allocations: 0, deallocations: 0, failures: 0, live_bytes: 0, budget: Some(16) }",
            format!("{ledger:?}")
        );
    }
}
