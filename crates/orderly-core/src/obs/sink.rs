//! Metrics sink boundary.
//!
//! Controller and store logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through ReorderEvent and MetricsSink.
//!
//! This module is the only allowed bridge between protocol logic
//! and the thread-local counter state.
use crate::obs::metrics::{self, bump};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Vec<Rc<dyn MetricsSink>>> = const { RefCell::new(Vec::new()) };
}

///
/// RejectReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    GateClosed,
    InFlight,
    OutOfRange,
    MissingId,
}

///
/// ReorderEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReorderEvent {
    Started,
    Unchanged,
    Rejected { reason: RejectReason },
    Applied { len: u64 },
    Confirmed,
    RolledBack,
    Abandoned,
    Discarded,
    Refresh { len: u64 },
    Refetch { ok: bool },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: ReorderEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: ReorderEvent) {
        metrics::with_state_mut(|m| match event {
            ReorderEvent::Started => bump(&mut m.reorders_started, 1),
            ReorderEvent::Unchanged => bump(&mut m.reorders_unchanged, 1),
            ReorderEvent::Rejected { reason } => match reason {
                RejectReason::GateClosed => bump(&mut m.rejected_gate_closed, 1),
                RejectReason::InFlight => bump(&mut m.rejected_in_flight, 1),
                RejectReason::OutOfRange => bump(&mut m.rejected_out_of_range, 1),
                RejectReason::MissingId => bump(&mut m.rejected_missing_id, 1),
            },
            ReorderEvent::Applied { len } => {
                bump(&mut m.reorders_applied, 1);
                bump(&mut m.ids_sent, len);
            }
            ReorderEvent::Confirmed => bump(&mut m.reorders_confirmed, 1),
            ReorderEvent::RolledBack => bump(&mut m.reorders_rolled_back, 1),
            ReorderEvent::Abandoned => bump(&mut m.reorders_abandoned, 1),
            ReorderEvent::Discarded => bump(&mut m.reorders_discarded, 1),
            ReorderEvent::Refresh { .. } => bump(&mut m.refreshes, 1),
            ReorderEvent::Refetch { ok: true } => bump(&mut m.refetch_ok, 1),
            ReorderEvent::Refetch { ok: false } => bump(&mut m.refetch_failed, 1),
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: ReorderEvent) {
    let top = SINK_OVERRIDE.with(|cell| cell.borrow().last().cloned());
    match top {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::ReorderCounters {
    metrics::report()
}

/// Reset all counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// Overrides nest; the innermost one receives events. The previous sink is
/// restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard;

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                cell.borrow_mut().pop();
            });
        }
    }

    SINK_OVERRIDE.with(|cell| cell.borrow_mut().push(sink));
    let _guard = Guard;

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: ReorderEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    fn override_depth() -> usize {
        SINK_OVERRIDE.with(|cell| cell.borrow().len())
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        record(ReorderEvent::Started);
        assert_eq!(outer.calls.get(), 0);

        with_metrics_sink(outer.clone(), || {
            record(ReorderEvent::Started);
            assert_eq!(outer.calls.get(), 1);

            with_metrics_sink(inner.clone(), || {
                record(ReorderEvent::Confirmed);
            });

            // Inner override was restored to outer override.
            record(ReorderEvent::RolledBack);
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);
        assert_eq!(override_depth(), 0);
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        let sink = Rc::new(CountingSink::default());

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(ReorderEvent::Started);
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();

        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);
        assert_eq!(override_depth(), 0);
    }

    #[test]
    fn global_sink_accumulates_per_reason() {
        metrics_reset_all();

        record(ReorderEvent::Rejected {
            reason: RejectReason::GateClosed,
        });
        record(ReorderEvent::Rejected {
            reason: RejectReason::MissingId,
        });
        record(ReorderEvent::Applied { len: 4 });
        record(ReorderEvent::Refetch { ok: false });

        let counters = metrics_report();
        assert_eq!(counters.rejected_gate_closed, 1);
        assert_eq!(counters.rejected_missing_id, 1);
        assert_eq!(counters.rejected_total(), 2);
        assert_eq!(counters.reorders_applied, 1);
        assert_eq!(counters.ids_sent, 4);
        assert_eq!(counters.refetch_failed, 1);
    }

    #[test]
    fn reset_clears_counters() {
        record(ReorderEvent::Confirmed);
        metrics_reset_all();

        assert_eq!(metrics_report(), metrics::ReorderCounters::default());
    }
}
