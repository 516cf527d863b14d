//! Board coordinates.

use super::types::{BOARD_LEN, Board};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A cell position on the board (row-major index 0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row of this position (0-2).
    pub fn row(self) -> u32 {
        (self.index() / 3) as u32
    }

    /// Column of this position (0-2).
    pub fn column(self) -> u32 {
        (self.index() % 3) as u32
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Resolves a `(row, column)` pair to a position.
    ///
    /// The pair is folded into the row-major index `row * 3 + column` before
    /// the range check, so `(0, 5)` addresses the same cell as `(1, 2)`.
    /// Returns `None` when the index falls outside the board.
    #[instrument]
    pub fn from_row_column(row: u32, column: u32) -> Option<Self> {
        let index = u64::from(row) * 3 + u64::from(column);
        if index < BOARD_LEN as u64 {
            Self::from_index(index as usize)
        } else {
            None
        }
    }

    /// Returns the positions of all empty cells, in index order.
    #[instrument(skip(board))]
    pub fn open(board: &Board) -> Vec<Position> {
        Self::iter().filter(|pos| board.is_empty(*pos)).collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Side};

    #[test]
    fn test_row_column_round_trip() {
        for pos in Position::iter() {
            assert_eq!(Position::from_row_column(pos.row(), pos.column()), Some(pos));
        }
    }

    #[test]
    fn test_row_column_folds_into_index() {
        assert_eq!(Position::from_row_column(0, 5), Some(Position::MiddleRight));
        assert_eq!(Position::from_row_column(2, 3), None);
        assert_eq!(Position::from_row_column(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_open_skips_marked_cells() {
        let mut board = Board::new();
        board.set(Position::Center, Cell::Marked(Side::Host));
        let open = Position::open(&board);
        assert_eq!(open.len(), 8);
        assert!(!open.contains(&Position::Center));
    }
}
