//! ## Crate layout
//! - `core`: ordered snapshots, the reorder gate, the controller, the
//!   authority contract and its REST binding, config and observability.
//! - `error`: the public error taxonomy callers match on.
//!
//! The `prelude` module is the surface a list view needs to wire up
//! drag-and-drop reordering for one collection.

pub use orderly_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            authority::{
                HttpRequest, HttpResponse, Method, OrderAuthority as _, RestOrderAuthority,
                Transport, TransportError,
            },
            collection::Snapshot,
            config::{InFlightPolicy, ReorderConfig},
            entity::{EntityId, OrderedEntity as _, Record},
            gate::{FilterState, ViewState},
            notify::{Notice, NoticeLevel, NoticeLog, NoticePersistence, Notifier},
            reorder::{ReorderController, ReorderOutcome},
        },
        error::{Error, ErrorKind, OutcomeExt as _},
    };
}
