//! Integration tests for the board: slot selection and manual swaps.

use badminton_draw::{BoardState, Court, Round, SelectOutcome, Selection, SlotRef};

fn court(names: [&str; 4]) -> Court {
    Court::new(names.map(String::from))
}

fn sample_board() -> BoardState {
    let mut board = BoardState::new();
    board.replace(Round {
        courts: vec![court(["A", "B", "C", "D"]), court(["E", "F", "G", "H"])],
        waiting: vec!["I".to_string(), "J".to_string()],
    });
    board
}

fn slot(court: usize, position: usize) -> SlotRef {
    SlotRef::Court { court, position }
}

#[test]
fn selecting_same_slot_twice_cancels_without_changes() {
    let mut board = sample_board();
    let before = board.round().cloned();
    assert_eq!(board.select_slot(slot(0, 1)), SelectOutcome::Selected(slot(0, 1)));
    assert_eq!(board.selection(), Selection::OneSelected(slot(0, 1)));
    assert_eq!(board.select_slot(slot(0, 1)), SelectOutcome::Cancelled);
    assert_eq!(board.selection(), Selection::Empty);
    assert_eq!(board.round().cloned(), before);
}

#[test]
fn second_slot_swaps_and_clears_selection() {
    let mut board = sample_board();
    board.select_slot(slot(0, 0));
    let waiting = SlotRef::Waiting { index: 1 };
    assert_eq!(board.select_slot(waiting), SelectOutcome::Swapped(slot(0, 0), waiting));
    assert_eq!(board.selection(), Selection::Empty);
    assert_eq!(board.occupant_at(slot(0, 0)).map(String::as_str), Some("J"));
    assert_eq!(board.occupant_at(waiting).map(String::as_str), Some("A"));

    let round = board.round().unwrap();
    assert_eq!(round.courts.len(), 2);
    assert_eq!(round.waiting.len(), 2);
}

#[test]
fn swap_is_its_own_inverse() {
    let mut board = sample_board();
    let before = board.round().cloned();
    let (a, b) = (slot(0, 2), slot(1, 3));
    assert!(board.swap(a, b));
    assert_eq!(board.occupant_at(a).map(String::as_str), Some("H"));
    assert_eq!(board.occupant_at(b).map(String::as_str), Some("C"));
    assert!(board.swap(a, b));
    assert_eq!(board.round().cloned(), before);
}

#[test]
fn clicking_missing_slot_is_ignored() {
    let mut board = sample_board();
    board.select_slot(slot(0, 0));
    assert_eq!(board.select_slot(slot(5, 0)), SelectOutcome::Ignored);
    assert_eq!(board.select_slot(slot(0, 4)), SelectOutcome::Ignored);
    assert_eq!(board.select_slot(SlotRef::Waiting { index: 2 }), SelectOutcome::Ignored);
    // The pending selection survives a stray click.
    assert_eq!(board.selection(), Selection::OneSelected(slot(0, 0)));
}

#[test]
fn empty_board_has_no_slots() {
    let mut board = BoardState::new();
    assert_eq!(board.select_slot(slot(0, 0)), SelectOutcome::Ignored);
    assert!(!board.swap(slot(0, 0), slot(0, 1)));
    assert_eq!(board.occupant_at(slot(0, 0)), None);
}

#[test]
fn new_round_clears_pending_selection() {
    let mut board = sample_board();
    board.select_slot(slot(1, 1));
    board.replace(Round::default());
    assert_eq!(board.selection(), Selection::Empty);
}
