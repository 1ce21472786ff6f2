use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

///
/// EntityId
///
/// Opaque, stable identifier of one entity within its collection.
/// Compared by exact string equality; never interpreted.
///

#[derive(
    Clone, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

///
/// OrderedEntity
///
/// Any record that participates in a user-defined order.
/// Everything beyond these three accessors is opaque cargo.
///

pub trait OrderedEntity: Clone {
    /// Identifier, if the record carries one. Records without an id
    /// can be displayed but never reordered.
    fn id(&self) -> Option<&EntityId>;

    /// Last known server sort key.
    fn order(&self) -> Option<i64>;

    /// Secondary sort key, compared case-insensitively.
    fn name(&self) -> &str;
}

///
/// Record
///
/// Concrete entity decoded from REST list payloads.
/// Accepts either `id` or `_id` for the identifier.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<EntityId>, order: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            order,
            name: name.into(),
            payload: Map::new(),
        }
    }
}

impl OrderedEntity for Record {
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

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_underscore_id_and_keeps_payload() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "_id": "66a1",
            "name": "France",
            "order": 3,
            "flagUrl": "https://cdn.example/fr.png",
        }))
        .expect("record should decode");

        assert_eq!(record.id(), Some(&EntityId::from("66a1")));
        assert_eq!(record.order(), Some(3));
        assert_eq!(record.name(), "France");
        assert_eq!(
            record.payload.get("flagUrl"),
            Some(&Value::from("https://cdn.example/fr.png"))
        );
    }

    #[test]
    fn record_without_id_or_order_decodes() {
        let record: Record = serde_json::from_value(serde_json::json!({ "name": "Tourist visa" }))
            .expect("record should decode");

        assert!(record.id().is_none());
        assert!(record.order().is_none());
    }
}
