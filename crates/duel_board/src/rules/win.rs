//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Position, Side};
use tracing::instrument;

const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the side holding three in a row, `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Side> {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Cell::Marked(side) = cell
            && cell == board.get(b)
            && cell == board.get(c)
        {
            return Some(side);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Marked(Side::Host));
        board.set(Position::TopCenter, Cell::Marked(Side::Host));
        board.set(Position::TopRight, Cell::Marked(Side::Host));
        assert_eq!(check_winner(&board), Some(Side::Host));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopRight, Cell::Marked(Side::Challenger));
        board.set(Position::Center, Cell::Marked(Side::Challenger));
        board.set(Position::BottomLeft, Cell::Marked(Side::Challenger));
        assert_eq!(check_winner(&board), Some(Side::Challenger));
    }

    #[test]
    fn test_winner_right_column() {
        let board = Board::from_codes([1, 0, 2, 1, 0, 2, 0, 1, 2]).unwrap();
        assert_eq!(check_winner(&board), Some(Side::Challenger));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Marked(Side::Host));
        board.set(Position::TopCenter, Cell::Marked(Side::Challenger));
        board.set(Position::TopRight, Cell::Marked(Side::Host));
        assert_eq!(check_winner(&board), None);
    }
}
