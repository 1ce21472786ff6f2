//! Remote order authority: the contract the controller persists through, and
//! a REST binding of it.

mod envelope;
mod rest;

pub use envelope::{ListEnvelope, Pagination};
pub use rest::{HttpRequest, HttpResponse, Method, RestOrderAuthority, Transport, TransportError};

use crate::reorder::ReorderRequest;
use derive_more::Display;
use std::rc::Rc;
use thiserror::Error as ThisError;

///
/// OrderAuthority
///
/// Source of truth for a collection's order.
///
/// `persist_order` replaces the authoritative order with exactly the given
/// sequence. Implementations must make it atomic from the caller's point of
/// view and idempotent for a repeated identical request.
///

pub trait OrderAuthority<E> {
    fn persist_order(&self, request: &ReorderRequest) -> Result<(), AuthorityError>;

    /// Canonical collection, fetched after a confirmed reorder.
    /// `None` when the authority cannot refetch.
    fn refetch(&self) -> Option<Result<Vec<E>, AuthorityError>> {
        None
    }
}

impl<E, A: OrderAuthority<E> + ?Sized> OrderAuthority<E> for &A {
    fn persist_order(&self, request: &ReorderRequest) -> Result<(), AuthorityError> {
        (**self).persist_order(request)
    }

    fn refetch(&self) -> Option<Result<Vec<E>, AuthorityError>> {
        (**self).refetch()
    }
}

impl<E, A: OrderAuthority<E> + ?Sized> OrderAuthority<E> for Rc<A> {
    fn persist_order(&self, request: &ReorderRequest) -> Result<(), AuthorityError> {
        (**self).persist_order(request)
    }

    fn refetch(&self) -> Option<Result<Vec<E>, AuthorityError>> {
        (**self).refetch()
    }
}

///
/// AuthorityErrorKind
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum AuthorityErrorKind {
    #[display("transport failure: {detail}")]
    Transport { detail: String },

    #[display("rejected with status {status}")]
    Rejected { status: u16 },

    #[display("undecodable response: {detail}")]
    Decode { detail: String },
}

///
/// AuthorityError
///
/// Remote failure. `message` is the server's human-readable text, if it
/// sent one, and is shown to the user verbatim.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct AuthorityError {
    pub kind: AuthorityErrorKind,
    pub message: Option<String>,
}

impl AuthorityError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: AuthorityErrorKind::Transport {
                detail: detail.into(),
            },
            message: None,
        }
    }

    #[must_use]
    pub const fn rejected(status: u16, message: Option<String>) -> Self {
        Self {
            kind: AuthorityErrorKind::Rejected { status },
            message,
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self {
            kind: AuthorityErrorKind::Decode {
                detail: detail.into(),
            },
            message: None,
        }
    }

    /// Conflict statuses mean the server's order moved underneath us.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.kind, AuthorityErrorKind::Rejected { status: 409 })
    }

    /// Text for the user: the server message when non-blank, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }
}

///
/// TESTS
///
