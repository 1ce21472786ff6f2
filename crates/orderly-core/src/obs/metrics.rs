use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// ReorderCounters
/// Ephemeral, in-memory counters for the reorder protocol.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReorderCounters {
    // Controller entrypoints
    pub reorders_started: u64,
    pub reorders_unchanged: u64,
    pub reorders_applied: u64,

    // Settlement
    pub reorders_confirmed: u64,
    pub reorders_rolled_back: u64,
    pub reorders_abandoned: u64,
    pub reorders_discarded: u64,

    // Pre-flight rejections
    pub rejected_gate_closed: u64,
    pub rejected_in_flight: u64,
    pub rejected_out_of_range: u64,
    pub rejected_missing_id: u64,

    // Store writes from upstream
    pub refreshes: u64,
    pub refetch_ok: u64,
    pub refetch_failed: u64,

    // Entities carried by persisted requests
    pub ids_sent: u64,
}

impl ReorderCounters {
    /// Total pre-flight rejections across all reasons.
    #[must_use]
    pub const fn rejected_total(&self) -> u64 {
        self.rejected_gate_closed
            .saturating_add(self.rejected_in_flight)
            .saturating_add(self.rejected_out_of_range)
            .saturating_add(self.rejected_missing_id)
    }
}

thread_local! {
    static COUNTERS: RefCell<ReorderCounters> = RefCell::new(ReorderCounters::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&ReorderCounters) -> R) -> R {
    COUNTERS.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut ReorderCounters) -> R) -> R {
    COUNTERS.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = ReorderCounters::default());
}

/// Snapshot of the current counters.
pub(crate) fn report() -> ReorderCounters {
    with_state(Clone::clone)
}

/// Increment a counter field in place.
pub(crate) const fn bump(counter: &mut u64, by: u64) {
    *counter = counter.saturating_add(by);
}
