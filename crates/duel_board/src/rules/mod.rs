//! Game rules for tic-tac-toe.
//!
//! Pure functions over an immutable board snapshot. Rules know nothing about
//! who the participants are; callers map [`Side`](crate::Side) back to
//! identities.

mod draw;
mod legal;
mod win;

pub use draw::is_full;
pub use legal::is_legal_move;
pub use win::check_winner;

use super::{Board, Outcome};
use tracing::instrument;

/// Evaluates the board.
///
/// A completed line wins for the owner of its mark. Otherwise a full board is
/// a draw and anything else is still ongoing.
#[instrument]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(side) = check_winner(board) {
        Outcome::Won(side)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
