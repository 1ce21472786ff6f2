//! Observability: runtime telemetry (counters) and sink abstractions.
//!
//! Structured log lines are emitted with `tracing` at the call sites; this
//! module only owns counters.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::ReorderCounters;
pub use sink::{
    MetricsSink, RejectReason, ReorderEvent, metrics_report, metrics_reset_all, with_metrics_sink,
};
