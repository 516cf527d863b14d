//! The game state machine.
//!
//! Per `(host, challenger)` key a game is absent, ongoing or finished.
//! Each operation checks authorization first, then its preconditions, then
//! computes the next record in full before a single store write. A failed
//! operation writes nothing.

use crate::action::{Advance, Close, Restart, Start};
use crate::auth::Authorizer;
use crate::contracts::{AdvanceContract, Contract};
use crate::store::{RecordStore, StoreErrorKind};
use crate::{EngineError, GameKey, GameRecord};
use duel_board::Position;
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe engine over a record store.
#[derive(Debug, Clone, Default)]
pub struct GameMachine<S> {
    store: S,
}

impl<S: RecordStore> GameMachine<S> {
    /// Creates an engine over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the record at `key`, mapping an absent key to
    /// [`EngineError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] or a store failure.
    #[instrument(skip(self))]
    pub fn game(&self, key: GameKey) -> Result<GameRecord, EngineError> {
        self.store
            .get(key.host, key.challenger)
            .map_err(|e| not_found_at(key, e.into()))
    }

    /// Opens a game: absent → ongoing, host to move, empty board.
    ///
    /// Requires the host's authorization.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`], [`EngineError::InvalidParticipants`],
    /// [`EngineError::AlreadyExists`], or a store failure.
    #[instrument(skip(self, auth))]
    pub fn start(
        &mut self,
        auth: &impl Authorizer,
        action: &Start,
    ) -> Result<GameRecord, EngineError> {
        auth.require(action.host)?;

        if action.challenger == action.host {
            warn!(account = %action.host, "Rejected start against self");
            return Err(EngineError::InvalidParticipants {
                account: action.host,
            });
        }

        let key = GameKey::new(action.host, action.challenger);
        if self.store.exists(key.host, key.challenger)? {
            warn!(%key, "Game already exists");
            return Err(EngineError::AlreadyExists { key });
        }

        let record = GameRecord::new(action.host, action.challenger);
        self.store
            .insert(key.host, record)
            .map_err(|e| match e.kind() {
                StoreErrorKind::Duplicate => EngineError::AlreadyExists { key },
                _ => e.into(),
            })?;

        info!(%key, "Game started");
        Ok(record)
    }

    /// Resets a game: any state → ongoing, empty board, host to move.
    ///
    /// Requires the authorization of `by`, who must be a participant.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`], [`EngineError::NotFound`],
    /// [`EngineError::Forbidden`], or a store failure.
    #[instrument(skip(self, auth))]
    pub fn restart(
        &mut self,
        auth: &impl Authorizer,
        action: &Restart,
    ) -> Result<GameRecord, EngineError> {
        auth.require(action.by)?;

        let key = GameKey::new(action.host, action.challenger);
        let record = self
            .store
            .modify(key.host, key.challenger, |record| {
                if record.side_of(action.by).is_none() {
                    warn!(%key, by = %action.by, "Restart by outsider");
                    return Err(EngineError::Forbidden {
                        key,
                        account: action.by,
                    });
                }
                record.reset();
                Ok(*record)
            })
            .map_err(|e| not_found_at(key, e))?;

        info!(%key, by = %action.by, "Game restarted");
        Ok(record)
    }

    /// Deletes a game: any state → absent.
    ///
    /// Only the host may close; requires the host's authorization.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`], [`EngineError::NotFound`], or a store
    /// failure.
    #[instrument(skip(self, auth))]
    pub fn close(&mut self, auth: &impl Authorizer, action: &Close) -> Result<(), EngineError> {
        auth.require(action.host)?;

        let key = GameKey::new(action.host, action.challenger);
        match self.store.erase(key.host, key.challenger) {
            Ok(()) => {
                info!(%key, "Game closed");
                Ok(())
            }
            Err(e) if e.kind() == StoreErrorKind::Missing => {
                warn!(%key, "No game to close");
                Err(EngineError::NotFound { key })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Plays one move: marks the cell, passes the turn, and records any
    /// winner or draw, all in one write.
    ///
    /// The preconditions are checked against the record inside the store's
    /// read-modify-write, so a move committed concurrently is never
    /// overwritten.
    ///
    /// Requires the authorization of `by`. Preconditions are checked in the
    /// order documented on [`LegalAdvance`](crate::contracts::LegalAdvance).
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthorized`], [`EngineError::NotFound`],
    /// [`EngineError::GameOver`], [`EngineError::Forbidden`],
    /// [`EngineError::NotYourTurn`], [`EngineError::IllegalMove`], or a store
    /// failure.
    #[instrument(skip(self, auth))]
    pub fn advance(
        &mut self,
        auth: &impl Authorizer,
        action: &Advance,
    ) -> Result<GameRecord, EngineError> {
        auth.require(action.by)?;

        let key = GameKey::new(action.host, action.challenger);
        let play_move = |record: &mut GameRecord| -> Result<(GameRecord, Position), EngineError> {
            let before = *record;
            let (position, side) = AdvanceContract::pre(&before, action).inspect_err(|e| {
                warn!(%key, error = %e, "Move rejected");
            })?;

            record.play(position, side);
            debug!(%key, %position, %side, winner = %record.winner(), "Move computed");

            // Postcondition: verify contract in debug builds
            #[cfg(debug_assertions)]
            AdvanceContract::post(&before, record)?;

            Ok((*record, position))
        };

        let (after, position) = self
            .store
            .modify(key.host, key.challenger, play_move)
            .map_err(|e| not_found_at(key, e))?;

        info!(%key, by = %action.by, %position, winner = %after.winner(), "Move played");
        Ok(after)
    }
}

/// Reports a store miss at `key` as [`EngineError::NotFound`].
fn not_found_at(key: GameKey, err: EngineError) -> EngineError {
    match err {
        EngineError::Store(e) if e.kind() == StoreErrorKind::Missing => {
            EngineError::NotFound { key }
        }
        other => other,
    }
}
