//! Release coordination for transient native-facing memory.
//!
//! Every buffer, string and array handed to the native library holds an
//! [`Allocation`] ticket for as long as it lives. Tickets are counted per
//! thread so a caller can check that nothing outlived the call it was made
//! for, on success and on failure alike.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
    static TOTAL: Cell<u64> = const { Cell::new(0) };
}

/// Number of transient allocations currently alive on this thread.
pub fn live_allocations() -> usize {
    LIVE.with(Cell::get)
}

/// Number of transient allocations ever made on this thread.
pub fn total_allocations() -> u64 {
    TOTAL.with(Cell::get)
}

/// Ticket held by one transient allocation. Dropping it marks the
/// allocation released.
#[derive(Debug)]
pub(crate) struct Allocation {
    // Tickets are counted on the thread that made them.
    _thread_bound: PhantomData<*const ()>,
}

impl Allocation {
    pub(crate) fn acquire() -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        TOTAL.with(|total| total.set(total.get() + 1));
        Self {
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get().saturating_sub(1)));
    }
}

/// Scope of one bridged operation. On exit it compares the live count with
/// the count at entry and reports anything left behind.
pub(crate) struct CallScope {
    operation: &'static str,
    baseline: usize,
}

impl CallScope {
    pub(crate) fn enter(operation: &'static str) -> Self {
        Self {
            operation,
            baseline: live_allocations(),
        }
    }
}

impl Drop for CallScope {
    fn drop(&mut self) {
        let live = live_allocations();
        if live != self.baseline {
            log::warn!(
                "{}: {} transient allocation(s) outlived the call",
                self.operation,
                live.saturating_sub(self.baseline)
            );
        }
    }
}
