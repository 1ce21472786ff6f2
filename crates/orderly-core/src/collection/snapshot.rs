use crate::{entity::OrderedEntity, error::InternalError};
use derive_more::Deref;
use std::{collections::HashSet, sync::Arc};

///
/// Snapshot
///
/// Immutable ordered view of a collection at one instant.
/// Contains no duplicate ids. Entities without an id are allowed here;
/// they only block reorder request construction.
///
/// Cloning shares the underlying slice. A snapshot is never mutated after
/// construction, so a clone is a faithful copy for rollback purposes.
///

#[derive(Clone, Debug, Deref)]
#[deref(forward)]
pub struct Snapshot<E>(Arc<[E]>);

impl<E: OrderedEntity> Snapshot<E> {
    /// Build a snapshot, preserving the given order.
    pub fn new(entities: Vec<E>) -> Result<Self, InternalError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for id in entities.iter().filter_map(OrderedEntity::id) {
            if !seen.insert(id) {
                return Err(InternalError::duplicate_id(id.as_str()));
            }
        }

        Ok(Self(entities.into()))
    }

    // Build from a permutation of an existing snapshot; ids are already unique.
    pub(crate) fn from_permutation(entities: Vec<E>) -> Self {
        Self(entities.into())
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::<E>::new()))
    }

    /// True when both handles point at the same underlying slice.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<E: OrderedEntity> Default for Snapshot<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: PartialEq> PartialEq for Snapshot<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity, ids_of, unnamed_without_id};

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = Snapshot::new(vec![
            entity("a", Some(1), "Alpha"),
            entity("a", Some(2), "Again"),
        ])
        .expect_err("duplicate ids must be rejected");

        assert!(err.is_conflict());
    }

    #[test]
    fn new_allows_multiple_entities_without_id() {
        let snapshot = Snapshot::new(vec![
            unnamed_without_id(),
            unnamed_without_id(),
            entity("a", None, "Alpha"),
        ])
        .expect("missing ids do not collide");

        assert_eq!(snapshot.len(), 3);
        assert_eq!(ids_of(&snapshot), ["", "", "a"]);
    }

    #[test]
    fn clone_shares_storage_and_compares_equal() {
        let snapshot = Snapshot::new(vec![entity("a", Some(1), "Alpha")]).expect("snapshot");
        let copy = snapshot.clone();

        assert!(copy.ptr_eq(&snapshot));
        assert_eq!(copy, snapshot);
    }
}
