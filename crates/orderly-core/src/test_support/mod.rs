//! Shared fixtures for core tests: a minimal entity, a scripted authority and
//! a scripted HTTP transport.

use crate::{
    authority::{
        AuthorityError, HttpRequest, HttpResponse, OrderAuthority, Transport, TransportError,
    },
    entity::{EntityId, OrderedEntity},
    reorder::ReorderRequest,
};
use std::{cell::RefCell, collections::VecDeque};

///
/// TestEntity
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEntity {
    pub id: Option<EntityId>,
    pub order: Option<i64>,
    pub name: String,
}

impl OrderedEntity for TestEntity {
    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn order(&self) -> Option<i64> {
        self.order
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build a test entity with an id.
pub fn entity(id: &str, order: Option<i64>, name: &str) -> TestEntity {
    TestEntity {
        id: Some(EntityId::from(id)),
        order,
        name: name.to_string(),
    }
}

/// Build a test entity that cannot be reordered.
pub fn unnamed_without_id() -> TestEntity {
    TestEntity {
        id: None,
        order: None,
        name: String::new(),
    }
}

/// Ids in display order; entities without one show as `""`.
pub fn ids_of<E: OrderedEntity>(entities: &[E]) -> Vec<&str> {
    entities
        .iter()
        .map(|e| e.id().map_or("", EntityId::as_str))
        .collect()
}

///
/// ScriptedAuthority
///
/// Accepts by default; queued failures are consumed one per call.
///

#[derive(Default)]
pub struct ScriptedAuthority {
    failures: RefCell<VecDeque<AuthorityError>>,
    persisted: RefCell<Vec<Vec<String>>>,
    refetch: RefCell<Option<Result<Vec<TestEntity>, AuthorityError>>>,
    refetches: RefCell<usize>,
}

impl ScriptedAuthority {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, err: AuthorityError) {
        self.failures.borrow_mut().push_back(err);
    }

    pub fn set_refetch(&self, entities: Vec<TestEntity>) {
        *self.refetch.borrow_mut() = Some(Ok(entities));
    }

    pub fn fail_refetch(&self, err: AuthorityError) {
        *self.refetch.borrow_mut() = Some(Err(err));
    }

    /// Every id list sent, including ones that were then refused.
    pub fn persisted(&self) -> Vec<Vec<String>> {
        self.persisted.borrow().clone()
    }

    pub fn refetches(&self) -> usize {
        *self.refetches.borrow()
    }
}

impl OrderAuthority<TestEntity> for ScriptedAuthority {
    fn persist_order(&self, request: &ReorderRequest) -> Result<(), AuthorityError> {
        self.persisted.borrow_mut().push(
            request
                .ids()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        );

        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn refetch(&self) -> Option<Result<Vec<TestEntity>, AuthorityError>> {
        *self.refetches.borrow_mut() += 1;
        self.refetch.borrow().clone()
    }
}

///
/// ScriptedTransport
///
/// Replies with one fixed response (or failure) and records requests.
///

pub struct ScriptedTransport {
    reply: Result<HttpResponse, TransportError>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, body: &[u8]) -> Self {
        Self {
            reply: Ok(HttpResponse {
                status,
                body: body.to_vec(),
            }),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(TransportError::new(message)),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.reply.clone()
    }
}
