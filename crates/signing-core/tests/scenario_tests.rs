//! Scenario tests for the reorder engine against realistic signer lineups.

use pretty_assertions::assert_eq;
use rstest::rstest;
use signing_core::{Entry, Error, Identity, ManualOrder, Move, Sequence, Unlocked};
use signing_test_utils::{layout, lineup, names};

// ==========================================================================
// Drag
// ==========================================================================

#[test]
fn test_drag_first_to_third_of_four() {
    let mut fixture = lineup("a b c d");

    fixture
        .sequence
        .reorder_via_drag(&fixture.locked, 0, Some(2))
        .unwrap();

    assert_eq!(
        layout(&fixture.sequence),
        vec![("b", 1), ("c", 2), ("a", 3), ("d", 4)]
    );
}

#[test]
fn test_drag_onto_locked_signer_slides_past_it() {
    let mut fixture = lineup("a b* c");

    let moved = fixture
        .sequence
        .reorder_via_drag(&fixture.locked, 0, Some(1))
        .unwrap();

    assert_eq!(moved, Some(Move::new(Identity::new("a"), 0, 2)));
    assert_eq!(
        layout(&fixture.sequence),
        vec![("c", 1), ("b", 2), ("a", 3)]
    );
}

#[test]
fn test_drag_across_consecutive_locked_signers() {
    let mut fixture = lineup("a b* c* d e");

    fixture
        .sequence
        .reorder_via_drag(&fixture.locked, 4, Some(1))
        .unwrap();

    // Slides from 1 past both locked signers onto slot 3.
    assert_eq!(
        layout(&fixture.sequence),
        vec![("a", 1), ("b", 2), ("c", 3), ("e", 4), ("d", 5)]
    );
}

#[test]
fn test_drag_round_trip_restores_order() {
    let mut fixture = lineup("a b c d e");
    let original = fixture.sequence.clone();

    fixture
        .sequence
        .reorder_via_drag(&Unlocked, 1, Some(3))
        .unwrap();
    fixture
        .sequence
        .reorder_via_drag(&Unlocked, 3, Some(1))
        .unwrap();

    assert_eq!(fixture.sequence, original);
}

// ==========================================================================
// Manual order
// ==========================================================================

#[rstest]
#[case("0")]
#[case("abc")]
fn test_invalid_typed_order_reverts_display(#[case] typed: &str) {
    let mut fixture = lineup("a b c d");
    let before = fixture.sequence.clone();

    let outcome = fixture
        .sequence
        .apply_manual_order(&fixture.locked, 2, typed)
        .unwrap();

    assert_eq!(
        outcome,
        ManualOrder::Reverted {
            display: "3".to_string()
        }
    );
    assert_eq!(fixture.sequence, before);
}

#[test]
fn test_typed_own_place_is_idempotent() {
    let mut fixture = lineup("a b* c d");
    let before = fixture.sequence.clone();

    for position in [0, 2, 3] {
        let display = (position + 1).to_string();
        let outcome = fixture
            .sequence
            .apply_manual_order(&fixture.locked, position, &display)
            .unwrap();
        assert_eq!(outcome, ManualOrder::Unchanged);
    }

    assert_eq!(fixture.sequence, before);
}

#[test]
fn test_typed_order_matches_drag_when_target_is_free() {
    let typed = {
        let mut fixture = lineup("a b* c d e*");
        fixture
            .sequence
            .apply_manual_order(&fixture.locked, 0, "4")
            .unwrap();
        fixture.sequence
    };
    let dragged = {
        let mut fixture = lineup("a b* c d e*");
        fixture
            .sequence
            .reorder_via_drag(&fixture.locked, 0, Some(3))
            .unwrap();
        fixture.sequence
    };

    assert_eq!(typed, dragged);
    assert_eq!(names(&typed), vec!["c", "b", "d", "a", "e"]);
}

#[test]
fn test_typed_order_for_locked_signer_is_rejected() {
    let mut fixture = lineup("a b* c");

    let result = fixture
        .sequence
        .apply_manual_order(&fixture.locked, 1, "3");

    assert_eq!(
        result,
        Err(Error::LockedEntry {
            identity: Identity::new("b")
        })
    );
}

// ==========================================================================
// Add / remove
// ==========================================================================

#[test]
fn test_remove_middle_signer_normalizes() {
    let mut fixture = lineup("a b c d");

    fixture
        .sequence
        .remove_entry(&fixture.locked, &Identity::new("b"))
        .unwrap();

    assert_eq!(
        layout(&fixture.sequence),
        vec![("a", 1), ("c", 2), ("d", 3)]
    );
}

#[test]
fn test_remove_locked_signer_leaves_sequence_untouched() {
    let mut fixture = lineup("a b* c");
    let before = fixture.sequence.clone();

    let result = fixture
        .sequence
        .remove_entry(&fixture.locked, &Identity::new("b"));

    assert!(result.unwrap_err().is_rejection());
    assert_eq!(fixture.sequence, before);
}

#[test]
fn test_append_after_reorders_takes_next_order() {
    let mut fixture = lineup("a b c");
    fixture
        .sequence
        .reorder_via_drag(&fixture.locked, 2, Some(0))
        .unwrap();

    let order = fixture.sequence.append(Entry::new(Identity::new("d")));

    assert_eq!(order, 4);
    assert_eq!(names(&fixture.sequence), vec!["c", "a", "b", "d"]);
}

#[test]
fn test_empty_sequence_first_append_is_one() {
    let mut sequence = Sequence::new();
    assert_eq!(sequence.append(Entry::new(Identity::new("solo"))), 1);
}
