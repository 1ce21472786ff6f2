use crate::{
    authority::{AuthorityError, ListEnvelope, OrderAuthority, Pagination},
    config::ReorderConfig,
    reorder::ReorderRequest,
};
use derive_more::Display;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error as ThisError;

///
/// Method
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Method {
    #[display("GET")]
    Get,

    #[display("PATCH")]
    Patch,
}

///
/// HttpRequest
///

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

///
/// HttpResponse
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

///
/// TransportError
///
/// The request never produced a response (connection, DNS, timeout).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// Transport
///
/// Minimal HTTP client seam. Auth headers, base URL and timeouts are the
/// implementor's business.
///

pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// Server error body; only `message` is read.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

///
/// RestOrderAuthority
///
/// `PATCH /<collection>/reorder` with `{ "<idsField>": [...] }` to persist,
/// `GET /<collection>` decoding a list envelope to refetch.
///

#[derive(Debug)]
pub struct RestOrderAuthority<T> {
    transport: T,
    reorder_path: String,
    list_path: String,
    ids_field: String,
}

impl<T: Transport> RestOrderAuthority<T> {
    pub fn new(transport: T, config: &ReorderConfig) -> Self {
        Self {
            transport,
            reorder_path: config.reorder_path(),
            list_path: config.list_path(),
            ids_field: config.ids_field.clone(),
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, AuthorityError> {
        let response = self
            .transport
            .send(request)
            .map_err(|e| AuthorityError::transport(e.message))?;

        if response.is_success() {
            Ok(response)
        } else {
            Err(AuthorityError::rejected(
                response.status,
                server_message(&response.body),
            ))
        }
    }
}

impl<T: Transport, E: DeserializeOwned> OrderAuthority<E> for RestOrderAuthority<T> {
    fn persist_order(&self, request: &ReorderRequest) -> Result<(), AuthorityError> {
        self.send(HttpRequest {
            method: Method::Patch,
            path: self.reorder_path.clone(),
            body: Some(request.to_body(&self.ids_field)),
        })?;

        Ok(())
    }

    fn refetch(&self) -> Option<Result<Vec<E>, AuthorityError>> {
        let result = self
            .send(HttpRequest {
                method: Method::Get,
                path: self.list_path.clone(),
                body: None,
            })
            .and_then(|response| {
                serde_json::from_slice::<ListEnvelope<E>>(&response.body)
                    .map(|envelope| {
                        if envelope.pagination.as_ref().is_some_and(Pagination::is_partial) {
                            tracing::warn!(
                                path = %self.list_path,
                                rows = envelope.data.len(),
                                "refetch returned one page of a paginated collection"
                            );
                        }
                        envelope.data
                    })
                    .map_err(|e| AuthorityError::decode(e.to_string()))
            });

        Some(result)
    }
}

// Extract `message` from a JSON error body; anything else yields `None`.
fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
}

///
/// TESTS
///
