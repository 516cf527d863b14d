//! Tests for board evaluation and move legality.

use duel_board::{Board, Outcome, Position, Side, check_winner, evaluate, is_full, is_legal_move};
use strum::IntoEnumIterator;

fn board(codes: [u8; 9]) -> Board {
    Board::from_codes(codes).expect("valid codes")
}

#[test]
fn test_every_line_wins_for_both_sides() {
    let lines: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
    for (code, side) in [(1, Side::Host), (2, Side::Challenger)] {
        for line in lines {
            let mut codes = [0u8; 9];
            for i in line {
                codes[i] = code;
            }
            assert_eq!(check_winner(&board(codes)), Some(side), "line {:?}", line);
        }
    }
}

#[test]
fn test_host_top_row() {
    assert_eq!(
        evaluate(&board([1, 1, 1, 0, 2, 0, 2, 0, 0])),
        Outcome::Won(Side::Host)
    );
}

#[test]
fn test_full_board_without_line_is_draw() {
    let full = board([1, 2, 1, 1, 2, 2, 2, 1, 2]);
    assert!(is_full(&full));
    assert_eq!(check_winner(&full), None);
    assert_eq!(evaluate(&full), Outcome::Draw);
}

#[test]
fn test_win_on_last_cell_is_not_draw() {
    let full = board([1, 2, 1, 2, 1, 2, 2, 1, 1]);
    assert!(is_full(&full));
    assert_eq!(evaluate(&full), Outcome::Won(Side::Host));
}

#[test]
fn test_empty_board_is_ongoing() {
    assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    assert!(!is_full(&Board::new()));
}

#[test]
fn test_every_empty_cell_is_legal() {
    let empty = Board::new();
    for pos in Position::iter() {
        assert!(is_legal_move(pos.row(), pos.column(), &empty), "{}", pos);
    }
}

#[test]
fn test_occupied_cell_is_illegal() {
    assert!(!is_legal_move(1, 1, &board([0, 0, 0, 0, 2, 0, 0, 0, 0])));
}

#[test]
fn test_out_of_range_is_illegal() {
    let empty = Board::new();
    assert!(!is_legal_move(3, 0, &empty));
    assert!(!is_legal_move(2, 3, &empty));
    assert!(!is_legal_move(u32::MAX, u32::MAX, &empty));
}

#[test]
fn test_column_overflow_folds_into_next_row() {
    // Coordinates address cell row * 3 + column, so (0, 5) is cell 5.
    let empty = Board::new();
    assert!(is_legal_move(0, 5, &empty));
    assert!(!is_legal_move(0, 5, &board([0, 0, 0, 0, 0, 1, 0, 0, 0])));
}
