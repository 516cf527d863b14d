//! Move legality.

use super::super::{Board, Position};
use tracing::instrument;

/// Checks whether a mark may be placed at `(row, column)`.
///
/// True iff `row * 3 + column` lies on the board and that cell is empty.
/// Out-of-range coordinates simply fail the predicate.
#[instrument(skip(board))]
pub fn is_legal_move(row: u32, column: u32, board: &Board) -> bool {
    Position::from_row_column(row, column).is_some_and(|pos| board.is_empty(pos))
}
