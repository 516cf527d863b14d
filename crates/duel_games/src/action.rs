//! First-class action types and their wire payloads.
//!
//! Every verb has a fixed payload schema: names as little-endian `u64`,
//! row and column as little-endian `u32`, in declaration order with no
//! framing. A payload must be exactly the schema's width.

use crate::Name;
use bincode::Options;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Discriminator of an inbound action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Open a new game.
    Start,
    /// Reset an existing game.
    Restart,
    /// Delete a game.
    Close,
    /// Play one move.
    Advance,
}

const START: Name = Name::from_static("start");
const RESTART: Name = Name::from_static("restart");
const CLOSE: Name = Name::from_static("close");
const ADVANCE: Name = Name::from_static("advance");

impl Verb {
    /// The tag identifying this verb on the wire.
    pub fn tag(self) -> Name {
        match self {
            Verb::Start => START,
            Verb::Restart => RESTART,
            Verb::Close => CLOSE,
            Verb::Advance => ADVANCE,
        }
    }

    /// Resolves a wire tag; `None` for tags this engine does not handle.
    pub fn from_tag(tag: Name) -> Option<Self> {
        Self::iter().find(|verb| verb.tag() == tag)
    }
}

/// Payload of [`Verb::Start`]: the host opens a game against the challenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Start {
    /// Invited participant.
    pub challenger: Name,
    /// Opening participant; must sign.
    pub host: Name,
}

/// Payload of [`Verb::Restart`]: either participant resets the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restart {
    /// Challenger of the game.
    pub challenger: Name,
    /// Host of the game.
    pub host: Name,
    /// Participant requesting the reset; must sign.
    pub by: Name,
}

/// Payload of [`Verb::Close`]: the host deletes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Close {
    /// Challenger of the game.
    pub challenger: Name,
    /// Host of the game; must sign.
    pub host: Name,
}

/// Payload of [`Verb::Advance`]: a participant marks one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    /// Challenger of the game.
    pub challenger: Name,
    /// Host of the game.
    pub host: Name,
    /// Participant making the move; must sign.
    pub by: Name,
    /// Target row.
    pub row: u32,
    /// Target column.
    pub column: u32,
}

/// A decoded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// See [`Start`].
    Start(Start),
    /// See [`Restart`].
    Restart(Restart),
    /// See [`Close`].
    Close(Close),
    /// See [`Advance`].
    Advance(Advance),
}

/// A payload that does not fit its verb's schema.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed {verb} payload: {message}")]
pub struct PayloadError {
    /// Verb whose schema was applied.
    pub verb: Verb,
    /// What went wrong.
    pub message: String,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

impl Action {
    /// Decodes `payload` with the schema of `verb`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if the payload is short or carries extra bytes.
    #[instrument(skip(payload), fields(len = payload.len()))]
    pub fn decode(verb: Verb, payload: &[u8]) -> Result<Self, PayloadError> {
        let malformed = |e: bincode::Error| PayloadError {
            verb,
            message: e.to_string(),
        };
        let codec = codec();
        Ok(match verb {
            Verb::Start => Action::Start(codec.deserialize(payload).map_err(malformed)?),
            Verb::Restart => Action::Restart(codec.deserialize(payload).map_err(malformed)?),
            Verb::Close => Action::Close(codec.deserialize(payload).map_err(malformed)?),
            Verb::Advance => Action::Advance(codec.deserialize(payload).map_err(malformed)?),
        })
    }

    /// Encodes the action's payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        let codec = codec();
        match self {
            Action::Start(a) => codec.serialize(a),
            Action::Restart(a) => codec.serialize(a),
            Action::Close(a) => codec.serialize(a),
            Action::Advance(a) => codec.serialize(a),
        }
        .map_err(|e| PayloadError {
            verb: self.verb(),
            message: e.to_string(),
        })
    }

    /// The verb selecting this action.
    pub fn verb(&self) -> Verb {
        match self {
            Action::Start(_) => Verb::Start,
            Action::Restart(_) => Verb::Restart,
            Action::Close(_) => Verb::Close,
            Action::Advance(_) => Verb::Advance,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Start(a) => write!(f, "start {} vs {}", a.host, a.challenger),
            Action::Restart(a) => write!(f, "restart {}/{} by {}", a.host, a.challenger, a.by),
            Action::Close(a) => write!(f, "close {}/{}", a.host, a.challenger),
            Action::Advance(a) => write!(
                f,
                "advance {}/{} by {} at ({}, {})",
                a.host, a.challenger, a.by, a.row, a.column
            ),
        }
    }
}
