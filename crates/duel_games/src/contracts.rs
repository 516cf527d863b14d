//! Contract-based validation for moves.
//!
//! Preconditions gate an [`Advance`] before anything is computed;
//! postconditions check the computed record before it is written back.

use crate::action::Advance;
use crate::invariants::{InvariantSet, MonotonicBoard, RecordInvariants};
use crate::{EngineError, GameRecord};
use duel_board::{Position, Side, is_legal_move};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} must hold before applying the action
/// - Postcondition: {Q(before, after)} must hold after applying it
pub trait Contract<S, A> {
    /// What a satisfied precondition yields for the transition.
    type Ready;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Ready, EngineError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has no winner yet.
pub struct GameOngoing;

impl GameOngoing {
    /// Fails with [`EngineError::GameOver`] once a winner or draw is recorded.
    pub fn check(record: &GameRecord) -> Result<(), EngineError> {
        if record.is_finished() {
            Err(EngineError::GameOver { key: record.key() })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover plays in this game.
pub struct IsParticipant;

impl IsParticipant {
    /// Returns the mover's side, or [`EngineError::Forbidden`].
    pub fn check(record: &GameRecord, mv: &Advance) -> Result<Side, EngineError> {
        record.side_of(mv.by).ok_or(EngineError::Forbidden {
            key: record.key(),
            account: mv.by,
        })
    }
}

/// Precondition: it is the mover's turn.
pub struct MoversTurn;

impl MoversTurn {
    /// Fails with [`EngineError::NotYourTurn`] unless `by` is due to move.
    pub fn check(record: &GameRecord, mv: &Advance) -> Result<(), EngineError> {
        if mv.by != *record.turn() {
            Err(EngineError::NotYourTurn {
                account: mv.by,
                turn: *record.turn(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell exists and is empty.
pub struct CellAvailable;

impl CellAvailable {
    /// Returns the target position, or [`EngineError::IllegalMove`].
    pub fn check(record: &GameRecord, mv: &Advance) -> Result<Position, EngineError> {
        let illegal = EngineError::IllegalMove {
            row: mv.row,
            column: mv.column,
        };
        if !is_legal_move(mv.row, mv.column, record.board()) {
            return Err(illegal);
        }
        Position::from_row_column(mv.row, mv.column).ok_or(illegal)
    }
}

/// Composite precondition, checked in order and failing on the first breach:
/// game ongoing, mover is a participant, mover's turn, cell available.
pub struct LegalAdvance;

impl LegalAdvance {
    /// Validates all preconditions for a move.
    #[instrument(skip(record))]
    pub fn check(record: &GameRecord, mv: &Advance) -> Result<(Position, Side), EngineError> {
        GameOngoing::check(record)?;
        let side = IsParticipant::check(record, mv)?;
        MoversTurn::check(record, mv)?;
        let position = CellAvailable::check(record, mv)?;
        Ok((position, side))
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for [`Advance`] actions.
///
/// Preconditions: see [`LegalAdvance`].
///
/// Postconditions:
/// - Exactly one previously empty cell gained a mark
/// - All [`RecordInvariants`] hold for the new record
pub struct AdvanceContract;

impl Contract<GameRecord, Advance> for AdvanceContract {
    type Ready = (Position, Side);

    fn pre(record: &GameRecord, action: &Advance) -> Result<Self::Ready, EngineError> {
        LegalAdvance::check(record, action)
    }

    fn post(before: &GameRecord, after: &GameRecord) -> Result<(), EngineError> {
        let mut failed: Vec<String> = Vec::new();
        if !MonotonicBoard::holds(before, after) {
            failed.push(MonotonicBoard::description().to_string());
        }
        if let Err(violations) = RecordInvariants::check_all(after) {
            failed.extend(violations.into_iter().map(|v| v.description));
        }

        if failed.is_empty() {
            Ok(())
        } else {
            let description = failed.join("; ");
            warn!(key = %after.key(), %description, "Postcondition failed");
            Err(EngineError::InvariantViolation { description })
        }
    }
}
