use derive_more::Display;
use orderly_core::{
    authority::{AuthorityError, AuthorityErrorKind},
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    reorder::{ReorderOutcome, ReorderRejection},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (err.class, err.origin) {
            (_, CoreErrorOrigin::Config) => ErrorKind::Config,
            (ErrorClass::Conflict, CoreErrorOrigin::Store) => ErrorKind::DuplicateId,
            _ => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ReorderRejection> for Error {
    fn from(err: ReorderRejection) -> Self {
        let (kind, origin) = match err {
            ReorderRejection::GateClosed(_) => (RejectionKind::GateClosed, ErrorOrigin::Gate),
            ReorderRejection::InFlight => (RejectionKind::InFlight, ErrorOrigin::Controller),
            ReorderRejection::OutOfRange { .. } => {
                (RejectionKind::OutOfRange, ErrorOrigin::Controller)
            }
            ReorderRejection::MissingId { .. } => {
                (RejectionKind::MissingId, ErrorOrigin::Controller)
            }
        };

        Self::new(ErrorKind::Rejected(kind), origin, err.to_string())
    }
}

impl From<AuthorityError> for Error {
    fn from(err: AuthorityError) -> Self {
        let kind = match err.kind {
            AuthorityErrorKind::Transport { .. } => RemoteErrorKind::Transport,
            AuthorityErrorKind::Rejected { status: 409 } => RemoteErrorKind::Conflict,
            AuthorityErrorKind::Rejected { status } => RemoteErrorKind::Rejected { status },
            AuthorityErrorKind::Decode { .. } => RemoteErrorKind::Decode,
        };

        Self::new(ErrorKind::Remote(kind), ErrorOrigin::Authority, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Refused before anything was sent; the order did not change.
    Rejected(RejectionKind),

    /// The authority refused or could not be reached; the order was restored.
    Remote(RemoteErrorKind),

    /// Fetched collection carried the same id twice.
    DuplicateId,

    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// RejectionKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RejectionKind {
    /// Search or filters are active.
    GateClosed,

    /// Another reorder is awaiting confirmation.
    InFlight,

    OutOfRange,
    MissingId,
}

///
/// RemoteErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RemoteErrorKind {
    Transport,
    Rejected { status: u16 },

    /// The server's order changed underneath the request.
    Conflict,

    Decode,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    #[display("authority")]
    Authority,

    #[display("config")]
    Config,

    #[display("controller")]
    Controller,

    #[display("gate")]
    Gate,

    #[display("store")]
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// OutcomeExt
///
/// Result view over a reorder outcome, for callers that prefer `?`.
/// `Ok(true)` means the order changed.
///

pub trait OutcomeExt {
    fn into_result(self) -> Result<bool, Error>;
}

impl OutcomeExt for ReorderOutcome {
    fn into_result(self) -> Result<bool, Error> {
        match self {
            Self::Confirmed => Ok(true),
            Self::Unchanged | Self::Discarded => Ok(false),
            Self::Rejected(rejection) => Err(rejection.into()),
            Self::RolledBack(err) => Err(err.into()),
        }
    }
}

///
/// TESTS
///
