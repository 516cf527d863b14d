//! Row models for the `games` table.

use diesel::prelude::*;
use duel_board::{BOARD_LEN, Board};
use tracing::instrument;

use super::schema;
use crate::store::{StoreError, StoreErrorKind};
use crate::{GameRecord, Name, Winner};

const WINNER_UNDECIDED: i32 = 0;
const WINNER_DRAW: i32 = 1;
const WINNER_HOST: i32 = 2;
const WINNER_CHALLENGER: i32 = 3;

/// One row of the `games` table.
///
/// Names are stored in text form, the board as nine `0`/`1`/`2` digits, and
/// the winner as a code relative to the row's own participants so that an
/// account called `draw` or `none` cannot be confused with an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    pub host: String,
    pub challenger: String,
    pub turn: String,
    pub winner: i32,
    pub board: String,
}

#[track_caller]
fn corrupt(message: String) -> StoreError {
    StoreError::new(StoreErrorKind::Corrupt, message)
}

fn parse_name(field: &str, text: &str) -> Result<Name, StoreError> {
    text.parse()
        .map_err(|e| corrupt(format!("Bad {} name '{}': {}", field, text, e)))
}

impl From<&GameRecord> for GameRow {
    fn from(record: &GameRecord) -> Self {
        let winner = match record.winner() {
            Winner::Undecided => WINNER_UNDECIDED,
            Winner::Draw => WINNER_DRAW,
            Winner::Player(name) if name == record.host() => WINNER_HOST,
            Winner::Player(_) => WINNER_CHALLENGER,
        };
        Self {
            host: record.host().to_string(),
            challenger: record.challenger().to_string(),
            turn: record.turn().to_string(),
            winner,
            board: record
                .board()
                .codes()
                .iter()
                .map(|code| char::from(b'0' + code))
                .collect(),
        }
    }
}

impl GameRow {
    /// Decodes the row into a record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Corrupt`] error if any column fails to parse.
    #[instrument(skip(self), fields(host = %self.host, challenger = %self.challenger))]
    pub fn into_record(self) -> Result<GameRecord, StoreError> {
        let host = parse_name("host", &self.host)?;
        let challenger = parse_name("challenger", &self.challenger)?;
        let turn = parse_name("turn", &self.turn)?;

        let winner = match self.winner {
            WINNER_UNDECIDED => Winner::Undecided,
            WINNER_DRAW => Winner::Draw,
            WINNER_HOST => Winner::Player(host),
            WINNER_CHALLENGER => Winner::Player(challenger),
            other => return Err(corrupt(format!("Bad winner code {}", other))),
        };

        let digits = self.board.as_bytes();
        if digits.len() != BOARD_LEN {
            return Err(corrupt(format!("Board '{}' is not {} cells", self.board, BOARD_LEN)));
        }
        let mut codes = [0u8; BOARD_LEN];
        for (code, digit) in codes.iter_mut().zip(digits) {
            *code = digit.wrapping_sub(b'0');
        }
        let board = Board::from_codes(codes)
            .map_err(|e| corrupt(format!("Board '{}': {}", self.board, e)))?;

        Ok(GameRecord::from_parts(challenger, host, turn, winner, board))
    }
}
