//! Engine error types.

use crate::auth::Unauthorized;
use crate::store::StoreError;
use crate::{GameKey, Name};
use derive_more::{Display, Error};

/// Why an engine operation was rejected.
///
/// Every variant aborts the whole invocation with nothing written. Wrapped
/// errors are displayed in place rather than chained as a source.
#[derive(Debug, Clone, Display, Error)]
pub enum EngineError {
    /// The invocation lacks a required authorization.
    #[display("{_0}")]
    Unauthorized(#[error(not(source))] Unauthorized),

    /// Host and challenger are the same account.
    #[display("Challenger {account} cannot also be the host")]
    InvalidParticipants {
        /// The account named twice.
        account: Name,
    },

    /// A game between these accounts is already open.
    #[display("Game {key} already exists")]
    AlreadyExists {
        /// Address of the existing record.
        key: GameKey,
    },

    /// No game between these accounts.
    #[display("No game {key}")]
    NotFound {
        /// Address that was looked up.
        key: GameKey,
    },

    /// The acting account is not a participant.
    #[display("{account} is not a participant in {key}")]
    Forbidden {
        /// Address of the game.
        key: GameKey,
        /// The outsider.
        account: Name,
    },

    /// The acting account is a participant but it is the other side's move.
    #[display("Not {account}'s turn, waiting on {turn}")]
    NotYourTurn {
        /// The account that tried to move.
        account: Name,
        /// The account due to move.
        turn: Name,
    },

    /// The game already has a winner or ended in a draw.
    #[display("Game {key} is over")]
    GameOver {
        /// Address of the game.
        key: GameKey,
    },

    /// The target cell is off the board or already marked.
    #[display("Illegal move at row {row}, column {column}")]
    IllegalMove {
        /// Requested row.
        row: u32,
        /// Requested column.
        column: u32,
    },

    /// The record store failed.
    #[display("{_0}")]
    Store(#[error(not(source))] StoreError),

    /// A computed record broke a game invariant; nothing was written.
    #[display("Invariant violation: {description}")]
    InvariantViolation {
        /// Which invariants failed.
        description: String,
    },
}

impl From<Unauthorized> for EngineError {
    fn from(err: Unauthorized) -> Self {
        Self::Unauthorized(err)
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreErrorKind;
    use std::error::Error as _;

    #[test]
    fn test_wrapped_errors_print_once() {
        let err = EngineError::from(StoreError::new(StoreErrorKind::Backend, "disk full"));
        assert!(err.source().is_none());
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("disk full").count(), 1);

        let err = EngineError::from(Unauthorized {
            account: Name::from_static("carol"),
        });
        assert!(err.source().is_none());
    }
}
