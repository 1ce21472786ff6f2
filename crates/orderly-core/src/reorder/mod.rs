//! Optimistic reorder protocol: move arithmetic, request construction, and
//! the controller that applies, persists and (on failure) rolls back.

mod controller;
mod moves;
mod request;

pub use controller::{PendingReorder, ReorderController};
pub use moves::{Move, apply_move};
pub use request::ReorderRequest;

use crate::{authority::AuthorityError, gate::GateBlock, obs::RejectReason};
use thiserror::Error as ThisError;

///
/// ReorderRejection
///
/// Pre-flight refusal. Nothing reached the authority and the store holds
/// the same snapshot as before the call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ReorderRejection {
    #[error("{0}")]
    GateClosed(GateBlock),

    #[error("a reorder is already awaiting confirmation")]
    InFlight,

    #[error("move {start} -> {end} is out of range for {len} items")]
    OutOfRange { start: usize, end: usize, len: usize },

    #[error("entity at position {index} has no id")]
    MissingId { index: usize },
}

impl ReorderRejection {
    #[must_use]
    pub const fn reason(&self) -> RejectReason {
        match self {
            Self::GateClosed(_) => RejectReason::GateClosed,
            Self::InFlight => RejectReason::InFlight,
            Self::OutOfRange { .. } => RejectReason::OutOfRange,
            Self::MissingId { .. } => RejectReason::MissingId,
        }
    }
}

///
/// ReorderOutcome
///
/// What happened to one gesture. Informational only: every failure has
/// already been reported through the notifier.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReorderOutcome {
    /// Start and end were equal; nothing to do.
    Unchanged,

    Rejected(ReorderRejection),

    /// The authority accepted the new order.
    Confirmed,

    /// The authority refused; the pre-move snapshot was restored.
    RolledBack(AuthorityError),

    /// Settled after a refresh replaced the snapshot the move was computed
    /// against; the store was left alone.
    Discarded,
}

impl ReorderOutcome {
    /// True when the store now shows a different order than before.
    #[must_use]
    pub const fn order_changed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
