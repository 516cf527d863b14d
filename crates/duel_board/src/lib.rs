//! Pure tic-tac-toe board rules.
//!
//! Cells, positions, move legality, and outcome evaluation over a 3x3
//! board. Nothing here performs I/O or knows about participants' identities;
//! the engine in `duel_games` maps [`Side`] back to accounts.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod rules;
mod types;

pub use position::Position;
pub use rules::{check_winner, evaluate, is_full, is_legal_move};
pub use types::{BOARD_LEN, Board, Cell, CellError, Outcome, Side};
