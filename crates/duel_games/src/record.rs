//! The persisted game record.

use crate::Name;
use derive_getters::Getters;
use derive_new::new;
use duel_board::{Board, Cell, Outcome, Position, Side, evaluate};
use serde::{Deserialize, Serialize};

/// Address of a record: the host's scope plus the challenger as primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, new)]
pub struct GameKey {
    /// Storage scope (the host account).
    pub host: Name,
    /// Primary key within the host's scope.
    pub challenger: Name,
}

impl std::fmt::Display for GameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.host, self.challenger)
    }
}

/// Who, if anyone, has won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// The game is still being played.
    Undecided,
    /// Board full with no line.
    Draw,
    /// The named participant completed a line.
    Player(Name),
}

impl Winner {
    /// Maps a board outcome onto the participants of a game.
    pub fn from_outcome(outcome: Outcome, host: Name, challenger: Name) -> Self {
        match outcome.winner() {
            Some(Side::Host) => Winner::Player(host),
            Some(Side::Challenger) => Winner::Player(challenger),
            None if outcome.is_final() => Winner::Draw,
            None => Winner::Undecided,
        }
    }

    /// Returns true while the game accepts moves.
    pub fn is_undecided(&self) -> bool {
        matches!(self, Winner::Undecided)
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Undecided => write!(f, "none"),
            Winner::Draw => write!(f, "draw"),
            Winner::Player(name) => write!(f, "{}", name),
        }
    }
}

/// State of one game between a host and a challenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    challenger: Name,
    host: Name,
    turn: Name,
    winner: Winner,
    board: Board,
}

impl GameRecord {
    /// Creates a fresh game: empty board, host to move, no winner.
    pub fn new(host: Name, challenger: Name) -> Self {
        Self {
            challenger,
            host,
            turn: host,
            winner: Winner::Undecided,
            board: Board::new(),
        }
    }

    /// Reassembles a record from stored fields without validation.
    pub fn from_parts(
        challenger: Name,
        host: Name,
        turn: Name,
        winner: Winner,
        board: Board,
    ) -> Self {
        Self {
            challenger,
            host,
            turn,
            winner,
            board,
        }
    }

    /// Storage address of this record.
    pub fn key(&self) -> GameKey {
        GameKey::new(self.host, self.challenger)
    }

    /// Which side the account plays, if it is a participant.
    pub fn side_of(&self, account: Name) -> Option<Side> {
        if account == self.host {
            Some(Side::Host)
        } else if account == self.challenger {
            Some(Side::Challenger)
        } else {
            None
        }
    }

    /// The account playing the given side.
    pub fn name_of(&self, side: Side) -> Name {
        match side {
            Side::Host => self.host,
            Side::Challenger => self.challenger,
        }
    }

    /// Returns true once a winner or draw has been recorded.
    pub fn is_finished(&self) -> bool {
        !self.winner.is_undecided()
    }

    /// Winner implied by the current board.
    pub fn evaluate(&self) -> Winner {
        Winner::from_outcome(evaluate(&self.board), self.host, self.challenger)
    }

    /// Clears the board and hands the first move back to the host.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = self.host;
        self.winner = Winner::Undecided;
    }

    /// Marks `pos` for `side`, passes the turn, and recomputes the winner.
    ///
    /// Performs no validation; callers check legality first.
    pub(crate) fn play(&mut self, pos: Position, side: Side) {
        self.board.set(pos, Cell::Marked(side));
        self.turn = self.name_of(side.opponent());
        self.winner = self.evaluate();
    }
}
