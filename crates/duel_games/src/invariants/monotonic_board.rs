//! Monotonic board transition: marks are never overwritten.

use crate::GameRecord;

/// Transition check for a single move.
///
/// Every cell marked before the move keeps its mark, and exactly one
/// previously empty cell gains one.
pub struct MonotonicBoard;

impl MonotonicBoard {
    /// Checks the transition `before -> after`.
    pub fn holds(before: &GameRecord, after: &GameRecord) -> bool {
        let kept = before
            .board()
            .cells()
            .iter()
            .zip(after.board().cells())
            .all(|(old, new)| old.is_empty() || old == new);
        kept && after.board().marked() == before.board().marked() + 1
    }

    /// Human-readable description of the transition rule.
    pub fn description() -> &'static str {
        "Board squares are monotonic (one new mark, none overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Name, Winner};
    use duel_board::{Board, Cell, Position, Side};

    fn record(codes: [u8; 9]) -> GameRecord {
        let host: Name = "alice".parse().unwrap();
        let challenger: Name = "bob".parse().unwrap();
        GameRecord::from_parts(
            challenger,
            host,
            host,
            Winner::Undecided,
            Board::from_codes(codes).unwrap(),
        )
    }

    #[test]
    fn test_single_new_mark_holds() {
        let before = record([1, 2, 0, 0, 0, 0, 0, 0, 0]);
        let after = record([1, 2, 1, 0, 0, 0, 0, 0, 0]);
        assert!(MonotonicBoard::holds(&before, &after));
    }

    #[test]
    fn test_overwrite_violates() {
        let before = record([1, 2, 0, 0, 0, 0, 0, 0, 0]);
        let mut after = before;
        after.play(Position::TopCenter, Side::Host);
        assert_eq!(after.board().get(Position::TopCenter), Cell::Marked(Side::Host));
        assert!(!MonotonicBoard::holds(&before, &after));
    }

    #[test]
    fn test_no_change_violates() {
        let before = record([1, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert!(!MonotonicBoard::holds(&before, &before));
    }
}
