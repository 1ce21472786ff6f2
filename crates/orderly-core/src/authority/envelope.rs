use serde::{Deserialize, Serialize};

///
/// ListEnvelope
///
/// REST list payload: `{ "data": [...], "pagination": {...} }`.
/// `pagination` is optional; bulk endpoints omit it.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

///
/// Pagination
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// True when the server reports more rows than this page carries.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.total_pages > 1
    }
}

///
/// TESTS
///
