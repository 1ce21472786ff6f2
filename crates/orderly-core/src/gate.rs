//! Reorder eligibility.
//!
//! Under a filtered or searched view the visible indices are a reindexing of
//! the true order, so a move computed from them cannot be persisted safely.
//! The gate closes whenever the view is not the full, unfiltered collection.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter value meaning "no filtering on this dimension".
pub const ALL_SENTINEL: &str = "all";

///
/// FilterState
///
/// Named filter values. A filter that was never set, or was cleared,
/// holds the sentinel.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterState {
    sentinel: String,
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Reset one filter to the sentinel.
    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or(self.sentinel.as_str(), String::as_str)
    }

    /// True when every filter sits at the sentinel.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.active().next().is_none()
    }

    /// Names of filters currently narrowing the view.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, value)| **value != self.sentinel)
            .map(|(name, _)| name.as_str())
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(ALL_SENTINEL)
    }
}

///
/// ViewState
///
/// Search and filter context of the list the user is looking at.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ViewState {
    pub search: String,
    pub filters: FilterState,
}

impl ViewState {
    #[must_use]
    pub fn with_sentinel(sentinel: &str) -> Self {
        Self {
            search: String::new(),
            filters: FilterState::new(sentinel),
        }
    }

    #[must_use]
    pub fn is_reorder_allowed(&self) -> bool {
        is_reorder_allowed(&self.search, &self.filters)
    }
}

/// Reordering is allowed only with an empty search term and default filters.
#[must_use]
pub fn is_reorder_allowed(search: &str, filters: &FilterState) -> bool {
    search.is_empty() && filters.is_default()
}

///
/// GateBlock
///
/// Why the gate is closed. `Display` is the persistent notice text telling
/// the user how to re-enable reordering.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum GateBlock {
    #[display("Reordering is disabled while a search is active. Clear the search to reorder.")]
    Search,

    #[display("Reordering is disabled while filters are active. Reset all filters to reorder.")]
    Filters,

    #[display(
        "Reordering is disabled while a search and filters are active. Clear the search and reset all filters to reorder."
    )]
    SearchAndFilters,
}

/// Explain why reordering is blocked for this view, if it is.
#[must_use]
pub fn gate_block(view: &ViewState) -> Option<GateBlock> {
    match (!view.search.is_empty(), !view.filters.is_default()) {
        (false, false) => None,
        (true, false) => Some(GateBlock::Search),
        (false, true) => Some(GateBlock::Filters),
        (true, true) => Some(GateBlock::SearchAndFilters),
    }
}

///
/// TESTS
///
