use crate::{error::InternalError, gate::ALL_SENTINEL};
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// InFlightPolicy
///
/// What a new reorder does while another one is still awaiting the
/// authority.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
    /// Reject new reorders until the pending one settles.
    #[default]
    Block,

    /// Let reorders overlap. Each one rolls back to whatever the store
    /// held when it began.
    Overlap,
}

///
/// MessageConfig
///
/// Notice texts. Server-provided error messages take precedence over
/// `failure`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct MessageConfig {
    pub success: String,
    pub failure: String,
    pub missing_id: String,
    pub out_of_range: String,
    pub in_flight: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            success: "Order updated successfully".to_string(),
            failure: "Failed to update order".to_string(),
            missing_id: "Cannot reorder: some items are missing an id".to_string(),
            out_of_range: "Cannot reorder: the list changed, please try again".to_string(),
            in_flight: "Please wait for the previous reorder to finish".to_string(),
        }
    }
}

///
/// ReorderConfig
///
/// Per-collection settings for one reorderable list.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Collection path segment, e.g. `countries`.
    pub collection: String,

    /// Request body field carrying the id list, e.g. `countryIds`.
    /// Derived from `collection` when empty.
    pub ids_field: String,

    pub refetch_on_success: bool,
    pub in_flight: InFlightPolicy,
    pub filter_all_sentinel: String,
    pub messages: MessageConfig,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            collection: String::new(),
            ids_field: String::new(),
            refetch_on_success: true,
            in_flight: InFlightPolicy::default(),
            filter_all_sentinel: ALL_SENTINEL.to_string(),
            messages: MessageConfig::default(),
        }
    }
}

impl ReorderConfig {
    /// Defaults for one collection with the id field derived from its name.
    pub fn for_collection(collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let ids_field = derive_ids_field(&collection);

        Self {
            collection,
            ids_field,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, InternalError> {
        let mut config: Self = toml::from_str(source)
            .map_err(|e| InternalError::config_internal(format!("failed to parse config: {e}")))?;
        config.fill_derived();
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, InternalError> {
        if !path.exists() {
            return Err(InternalError::config_not_found(path.display().to_string()));
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            InternalError::config_internal(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::from_toml_str(&contents)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, InternalError> {
        toml::to_string_pretty(self)
            .map_err(|e| InternalError::config_internal(format!("failed to render config: {e}")))
    }

    pub fn validate(&self) -> Result<(), InternalError> {
        if self.collection.trim().is_empty() {
            return Err(InternalError::config_invalid("collection must not be empty"));
        }
        if self.collection.contains('/') {
            return Err(InternalError::config_invalid(format!(
                "collection must be a single path segment: '{}'",
                self.collection
            )));
        }
        if self.ids_field.trim().is_empty() {
            return Err(InternalError::config_invalid("ids_field must not be empty"));
        }
        if self.filter_all_sentinel.is_empty() {
            return Err(InternalError::config_invalid(
                "filter_all_sentinel must not be empty",
            ));
        }

        Ok(())
    }

    /// `PATCH` target for persisting a new order.
    #[must_use]
    pub fn reorder_path(&self) -> String {
        format!("/{}/reorder", self.collection)
    }

    /// `GET` target for refetching the canonical collection.
    #[must_use]
    pub fn list_path(&self) -> String {
        format!("/{}", self.collection)
    }

    fn fill_derived(&mut self) {
        if self.ids_field.is_empty() {
            self.ids_field = derive_ids_field(&self.collection);
        }
    }
}

/// `countries` -> `countryIds`, `visas` -> `visaIds`, `tour-packages` -> `tourPackageIds`.
///
/// Only the last word is singularized.
#[must_use]
pub fn derive_ids_field(collection: &str) -> String {
    let camel = collection.to_case(Case::Camel);
    if camel.is_empty() {
        return String::new();
    }

    format!("{}Ids", singularize(&camel))
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("ss") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

///
/// TESTS
///
