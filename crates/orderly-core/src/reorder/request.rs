use crate::{
    entity::{EntityId, OrderedEntity},
    reorder::ReorderRejection,
};
use serde_json::{Map, Value};

///
/// ReorderRequest
///
/// The complete new order as a flat id list; never a delta.
/// One id per snapshot entity, in display order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReorderRequest {
    ids: Vec<EntityId>,
}

impl ReorderRequest {
    /// Collect ids from an ordered view.
    ///
    /// Fails on the first entity without an id; a partial list is never
    /// produced.
    pub fn from_entities<E: OrderedEntity>(entities: &[E]) -> Result<Self, ReorderRejection> {
        let ids = entities
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                entity
                    .id()
                    .cloned()
                    .ok_or(ReorderRejection::MissingId { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ids })
    }

    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Request body `{ "<field>": [ids...] }`.
    #[must_use]
    pub fn to_body(&self, ids_field: &str) -> Value {
        let ids = self
            .ids
            .iter()
            .map(|id| Value::String(id.as_str().to_string()))
            .collect();

        let mut body = Map::with_capacity(1);
        body.insert(ids_field.to_string(), Value::Array(ids));

        Value::Object(body)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity, unnamed_without_id};
    use serde_json::json;

    #[test]
    fn ids_follow_display_order() {
        let request = ReorderRequest::from_entities(&[
            entity("b", Some(1), "B"),
            entity("a", Some(2), "A"),
        ])
        .expect("all ids present");

        assert_eq!(request.len(), 2);
        assert_eq!(request.ids(), [EntityId::from("b"), EntityId::from("a")]);
    }

    #[test]
    fn missing_id_reports_first_offending_index() {
        let err = ReorderRequest::from_entities(&[
            entity("a", Some(1), "A"),
            unnamed_without_id(),
            unnamed_without_id(),
        ])
        .expect_err("missing id must fail");

        assert_eq!(err, ReorderRejection::MissingId { index: 1 });
    }

    #[test]
    fn body_uses_collection_specific_field() {
        let request = ReorderRequest::from_entities(&[
            entity("fr", Some(1), "France"),
            entity("jp", Some(2), "Japan"),
        ])
        .expect("all ids present");

        assert_eq!(request.to_body("countryIds"), json!({ "countryIds": ["fr", "jp"] }));
    }

    #[test]
    fn empty_collection_builds_empty_request() {
        let request =
            ReorderRequest::from_entities::<crate::test_support::TestEntity>(&[]).expect("empty");

        assert!(request.is_empty());
        assert_eq!(request.to_body("visaIds"), json!({ "visaIds": [] }));
    }
}
