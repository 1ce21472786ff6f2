///
/// Move
///
/// One drag gesture expressed as positions in the displayed list.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Move {
    pub start: usize,
    pub end: usize,
}

impl Move {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_noop(self) -> bool {
        self.start == self.end
    }

    /// Both positions address an existing element of a list of `len`.
    #[must_use]
    pub const fn fits(self, len: usize) -> bool {
        self.start < len && self.end < len
    }
}

/// Remove the element at `start` and reinsert it at `end`.
///
/// Returns `None` when either position is out of range; the input is never
/// touched. No other element changes its relative order.
#[must_use]
pub fn apply_move<T: Clone>(items: &[T], mv: Move) -> Option<Vec<T>> {
    if !mv.fits(items.len()) {
        return None;
    }

    let mut updated = items.to_vec();
    let moved = updated.remove(mv.start);
    updated.insert(mv.end, moved);

    Some(updated)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn forward_move_shifts_intermediate_items_left() {
        let moved = apply_move(&['a', 'b', 'c', 'd'], Move::new(0, 2)).expect("in range");

        assert_eq!(moved, ['b', 'c', 'a', 'd']);
    }

    #[test]
    fn backward_move_shifts_intermediate_items_right() {
        let moved = apply_move(&['a', 'b', 'c', 'd'], Move::new(3, 1)).expect("in range");

        assert_eq!(moved, ['a', 'd', 'b', 'c']);
    }

    #[test]
    fn out_of_range_positions_yield_none() {
        assert_eq!(apply_move(&['a', 'b'], Move::new(2, 0)), None);
        assert_eq!(apply_move(&['a', 'b'], Move::new(0, 2)), None);
        assert_eq!(apply_move::<char>(&[], Move::new(0, 0)), None);
    }

    fn list_and_move() -> impl Strategy<Value = (Vec<u32>, Move)> {
        (2usize..24).prop_flat_map(|len| {
            (
                Just((0..len as u32).collect::<Vec<_>>()),
                (0..len, 0..len).prop_map(|(start, end)| Move::new(start, end)),
            )
        })
    }

    proptest! {
        #[test]
        fn moved_element_lands_at_end_and_others_keep_order((items, mv) in list_and_move()) {
            let updated = apply_move(&items, mv).expect("generated moves are in range");

            prop_assert_eq!(updated.len(), items.len());
            prop_assert_eq!(updated[mv.end], items[mv.start]);

            let mut rest_before = items.clone();
            rest_before.remove(mv.start);
            let mut rest_after = updated.clone();
            rest_after.remove(mv.end);
            prop_assert_eq!(rest_before, rest_after);
        }

        #[test]
        fn noop_move_is_identity((items, mv) in list_and_move()) {
            let noop = Move::new(mv.start, mv.start);

            prop_assert!(noop.is_noop());
            prop_assert_eq!(apply_move(&items, noop), Some(items));
        }
    }
}
