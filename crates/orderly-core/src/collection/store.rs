use crate::{
    collection::{Snapshot, sort::sort_for_ingest},
    entity::OrderedEntity,
    error::InternalError,
    obs::sink::{ReorderEvent, record},
};

///
/// OrderedStore
///
/// Holds the single current snapshot, i.e. the order the user sees.
/// Writers are upstream refresh (`set_snapshot`) and the reorder controller
/// (`replace`). Every write swaps the whole snapshot.
///

#[derive(Debug)]
pub struct OrderedStore<E> {
    current: Snapshot<E>,
    generation: u64,
}

impl<E: OrderedEntity> OrderedStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Snapshot::empty(),
            generation: 0,
        }
    }

    /// Replace the snapshot with freshly fetched entities in ingest order.
    ///
    /// On duplicate ids the previous snapshot is kept and an error returned.
    pub fn set_snapshot(&mut self, mut entities: Vec<E>) -> Result<(), InternalError> {
        sort_for_ingest(&mut entities);
        let snapshot = Snapshot::new(entities)?;

        record(ReorderEvent::Refresh {
            len: snapshot.len() as u64,
        });
        self.replace(snapshot);

        Ok(())
    }

    /// Current ordered view. Cheap; shares storage with the store.
    #[must_use]
    pub fn current_snapshot(&self) -> Snapshot<E> {
        self.current.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Monotonic write counter, bumped on every snapshot swap.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // Swap in an already-ordered snapshot without re-sorting.
    pub(crate) fn replace(&mut self, snapshot: Snapshot<E>) {
        self.current = snapshot;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<E: OrderedEntity> Default for OrderedStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
