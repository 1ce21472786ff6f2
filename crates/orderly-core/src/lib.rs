//! Core runtime for Orderly: ordered snapshots, the reorder eligibility gate,
//! the optimistic reorder controller, and the authority it persists through.

// public exports are one module level down
pub mod authority;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod gate;
pub mod notify;
pub mod obs;
pub mod reorder;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, transports, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        authority::OrderAuthority,
        collection::{OrderedStore, Snapshot},
        config::ReorderConfig,
        entity::{EntityId, OrderedEntity, Record},
        gate::{FilterState, ViewState},
        notify::{Notice, Notifier},
        reorder::{ReorderController, ReorderOutcome},
    };
}
