//! Core domain types for the tic-tac-toe board.

use super::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Number of cells on the board.
pub const BOARD_LEN: usize = 9;

/// Which participant a mark belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The participant who opened the game and always moves first.
    Host,
    /// The participant invited by the host.
    Challenger,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Host => Side::Challenger,
            Side::Challenger => Side::Host,
        }
    }
}

/// A cell on the board.
///
/// Serialized as its storage code: `0` empty, `1` host mark, `2` challenger mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell carries a participant's mark.
    Marked(Side),
}

impl Cell {
    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the owner of the mark, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Marked(side) => Some(side),
        }
    }

    /// Storage code of this cell.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Marked(Side::Host) => 1,
            Cell::Marked(Side::Challenger) => 2,
        }
    }
}

/// A cell code outside `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid cell code {code}")]
pub struct CellError {
    /// The rejected code.
    pub code: u8,
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Marked(Side::Host)),
            2 => Ok(Cell::Marked(Side::Challenger)),
            _ => Err(CellError { code }),
        }
    }
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order (index = row * 3 + column).
    cells: [Cell; BOARD_LEN],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from storage codes.
    ///
    /// # Errors
    ///
    /// Returns [`CellError`] for the first code outside `0..=2`.
    pub fn from_codes(codes: [u8; BOARD_LEN]) -> Result<Self, CellError> {
        let mut cells = [Cell::Empty; BOARD_LEN];
        for (cell, code) in cells.iter_mut().zip(codes) {
            *cell = Cell::try_from(code)?;
        }
        Ok(Self { cells })
    }

    /// Storage codes in row-major order.
    pub fn codes(&self) -> [u8; BOARD_LEN] {
        self.cells.map(Cell::code)
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; BOARD_LEN] {
        &self.cells
    }

    /// Number of cells carrying any mark.
    pub fn marked(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of cells carrying the given side's mark.
    pub fn marks_of(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|c| c.side() == Some(side))
            .count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Host marks render as `X`, challenger marks as `O`, and empty cells
    /// show their index so a player can read off coordinates.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => pos.to_string(),
                    Cell::Marked(Side::Host) => "X".to_string(),
                    Cell::Marked(Side::Challenger) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Evaluated result of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one cell is free.
    Ongoing,
    /// A side completed a line.
    Won(Side),
    /// Every cell is marked and no line is complete.
    Draw,
}

impl Outcome {
    /// Returns true once no further move may be played.
    pub fn is_final(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Won(side) => Some(*side),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "Ongoing"),
            Outcome::Won(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
