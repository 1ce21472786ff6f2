//! Ordered collection state: immutable snapshots, ingest ordering, and the
//! store that holds the current view.

mod snapshot;
pub mod sort;
mod store;

pub use snapshot::Snapshot;
pub use store::OrderedStore;
