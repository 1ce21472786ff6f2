use crate::entity::OrderedEntity;
use std::cmp::Ordering;

/// Ingest ordering: `order` ascending, entities without one last, then
/// case-insensitive name.
///
/// Callers must use a stable sort so fully tied entities keep arrival order.
pub fn ingest_cmp<E: OrderedEntity>(left: &E, right: &E) -> Ordering {
    cmp_order_key(left.order(), right.order())
        .then_with(|| cmp_name_casefold(left.name(), right.name()))
}

/// Sort entities in place into ingest order.
pub fn sort_for_ingest<E: OrderedEntity>(entities: &mut [E]) {
    entities.sort_by(ingest_cmp);
}

fn cmp_order_key(left: Option<i64>, right: Option<i64>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_name_casefold(left: &str, right: &str) -> Ordering {
    let l = left.chars().flat_map(char::to_lowercase);
    let r = right.chars().flat_map(char::to_lowercase);

    l.cmp(r)
}

///
/// TESTS
///
