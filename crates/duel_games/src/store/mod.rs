//! Keyed game record storage.
//!
//! Records live under an owner scope (the host) and are unique by primary key
//! (the challenger) within that scope. The engine only ever talks to the
//! [`RecordStore`] contract, so any engine offering per-key atomic
//! read-modify-write can back it.

mod error;
mod memory;
mod sqlite;

pub use error::{StoreError, StoreErrorKind};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{GameRecord, Name};

/// CRUD contract over game records.
///
/// Every method either completes or leaves the store untouched.
pub trait RecordStore {
    /// Checks whether a record exists at `(scope, key)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn exists(&self, scope: Name, key: Name) -> Result<bool, StoreError>;

    /// Loads the record at `(scope, key)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Missing`] error if no record is stored there.
    fn get(&self, scope: Name, key: Name) -> Result<GameRecord, StoreError>;

    /// Stores a new record under `scope`, keyed by its challenger.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Duplicate`] error if the key is taken, or
    /// [`StoreErrorKind::ScopeMismatch`] if the record's host is not `scope`.
    fn insert(&mut self, scope: Name, record: GameRecord) -> Result<(), StoreError>;

    /// Runs `mutator` on the record at `(scope, key)` and writes it back, as
    /// one atomic read-modify-write.
    ///
    /// The mutator sees the current stored record, so checks made inside it
    /// cannot go stale. If it returns `Err`, nothing is written. It may not
    /// change the record's host or challenger.
    ///
    /// # Errors
    ///
    /// Returns the mutator's error, or a [`StoreErrorKind::Missing`] error if
    /// no record is stored there.
    fn modify<T, E, F>(&mut self, scope: Name, key: Name, mutator: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameRecord) -> Result<T, E>,
        E: From<StoreError>;

    /// Deletes the record at `(scope, key)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Missing`] error if no record is stored there.
    fn erase(&mut self, scope: Name, key: Name) -> Result<(), StoreError>;

    /// Lists every record under `scope`, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn scope(&self, scope: Name) -> Result<Vec<GameRecord>, StoreError>;
}

/// Rejects a record whose identities do not match its storage address.
#[track_caller]
fn check_address(scope: Name, key: Name, record: &GameRecord) -> Result<(), StoreError> {
    if *record.host() != scope || *record.challenger() != key {
        return Err(StoreError::new(
            StoreErrorKind::ScopeMismatch,
            format!(
                "Record {} cannot live at {}/{}",
                record.key(),
                scope,
                key
            ),
        ));
    }
    Ok(())
}
