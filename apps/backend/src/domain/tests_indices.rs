use proptest::prelude::*;

use crate::config::game::INDEX_MAXIMUM;
use crate::domain::state::{IndexDelta, IndexKind, NationalIndices};

#[test]
fn apply_clamps_to_upper_bound() {
    let mut indices = NationalIndices::starting();
    indices.apply(&[IndexDelta {
        index: IndexKind::Economy,
        delta: 100,
    }]);
    assert_eq!(indices.economy, INDEX_MAXIMUM);
}

#[test]
fn apply_clamps_to_zero() {
    let mut indices = NationalIndices::starting();
    indices.apply(&[IndexDelta {
        index: IndexKind::Culture,
        delta: -100,
    }]);
    assert_eq!(indices.culture, 0);
    assert!(indices.any_depleted());
}

#[test]
fn first_depleted_follows_declaration_order() {
    let mut indices = NationalIndices::starting();
    indices.apply(&[
        IndexDelta {
            index: IndexKind::Science,
            delta: -100,
        },
        IndexDelta {
            index: IndexKind::Society,
            delta: -100,
        },
    ]);
    assert_eq!(indices.first_depleted(), Some(IndexKind::Society));
}

#[test]
fn fresh_indices_are_not_depleted() {
    let indices = NationalIndices::starting();
    assert!(!indices.any_depleted());
    assert_eq!(indices.first_depleted(), None);
}

proptest! {
    #[test]
    fn indices_never_leave_bounds(
        deltas in proptest::collection::vec((0usize..6, -40i32..40), 0..32)
    ) {
        let mut indices = NationalIndices::starting();
        for (slot, delta) in deltas {
            indices.apply(&[IndexDelta { index: IndexKind::ALL[slot], delta }]);
            for kind in IndexKind::ALL {
                let value = indices.get(kind);
                prop_assert!((0..=INDEX_MAXIMUM).contains(&value));
            }
        }
    }
}
