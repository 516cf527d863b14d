//! In-process record store.

use super::{RecordStore, StoreError, StoreErrorKind, check_address};
use crate::{GameRecord, Name};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Record store backed by an ordered map.
///
/// Holds nothing across process restarts; suited to tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<(Name, Name), GameRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all scopes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[track_caller]
fn missing(scope: Name, key: Name) -> StoreError {
    StoreError::new(StoreErrorKind::Missing, format!("No record at {}/{}", scope, key))
}

impl RecordStore for MemoryStore {
    #[instrument(skip(self))]
    fn exists(&self, scope: Name, key: Name) -> Result<bool, StoreError> {
        Ok(self.records.contains_key(&(scope, key)))
    }

    #[instrument(skip(self))]
    fn get(&self, scope: Name, key: Name) -> Result<GameRecord, StoreError> {
        self.records
            .get(&(scope, key))
            .copied()
            .ok_or_else(|| missing(scope, key))
    }

    #[instrument(skip(self, record))]
    fn insert(&mut self, scope: Name, record: GameRecord) -> Result<(), StoreError> {
        let key = *record.challenger();
        check_address(scope, key, &record)?;
        if self.records.contains_key(&(scope, key)) {
            return Err(StoreError::new(
                StoreErrorKind::Duplicate,
                format!("Record {}/{} already exists", scope, key),
            ));
        }
        self.records.insert((scope, key), record);
        debug!(%scope, %key, "Record inserted");
        Ok(())
    }

    #[instrument(skip(self, mutator))]
    fn modify<T, E, F>(&mut self, scope: Name, key: Name, mutator: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameRecord) -> Result<T, E>,
        E: From<StoreError>,
    {
        let slot = self
            .records
            .get_mut(&(scope, key))
            .ok_or_else(|| missing(scope, key))?;

        // Mutate a copy so a rejected change leaves the slot untouched.
        let mut updated = *slot;
        let value = mutator(&mut updated)?;
        check_address(scope, key, &updated)?;
        *slot = updated;

        debug!(%scope, %key, "Record modified");
        Ok(value)
    }

    #[instrument(skip(self))]
    fn erase(&mut self, scope: Name, key: Name) -> Result<(), StoreError> {
        self.records
            .remove(&(scope, key))
            .map(|_| debug!(%scope, %key, "Record erased"))
            .ok_or_else(|| missing(scope, key))
    }

    #[instrument(skip(self))]
    fn scope(&self, scope: Name) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self
            .records
            .range((scope, Name::from_raw(0))..=(scope, Name::from_raw(u64::MAX)))
            .map(|(_, record)| *record)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_board::{Position, Side};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_then_get() {
        let mut store = MemoryStore::new();
        let record = GameRecord::new(name("alice"), name("bob"));
        store.insert(name("alice"), record).unwrap();
        assert!(store.exists(name("alice"), name("bob")).unwrap());
        assert_eq!(store.get(name("alice"), name("bob")).unwrap(), record);
    }

    #[test]
    fn test_insert_duplicate_fails() {
        let mut store = MemoryStore::new();
        let record = GameRecord::new(name("alice"), name("bob"));
        store.insert(name("alice"), record).unwrap();
        let err = store.insert(name("alice"), record).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Duplicate);
    }

    #[test]
    fn test_insert_wrong_scope_fails() {
        let mut store = MemoryStore::new();
        let record = GameRecord::new(name("alice"), name("bob"));
        let err = store.insert(name("carol"), record).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::ScopeMismatch);
        assert!(store.is_empty());
    }

    #[test]
    fn test_modify_rejects_identity_change() {
        let mut store = MemoryStore::new();
        let record = GameRecord::new(name("alice"), name("bob"));
        store.insert(name("alice"), record).unwrap();

        let err = store
            .modify(name("alice"), name("bob"), |r| {
                *r = GameRecord::new(name("alice"), name("dave"));
                Ok::<_, StoreError>(())
            })
            .unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::ScopeMismatch);
        assert_eq!(store.get(name("alice"), name("bob")).unwrap(), record);
    }

    #[test]
    fn test_rejected_mutation_writes_nothing() {
        let mut store = MemoryStore::new();
        let record = GameRecord::new(name("alice"), name("bob"));
        store.insert(name("alice"), record).unwrap();

        let result: Result<(), StoreError> = store.modify(name("alice"), name("bob"), |r| {
            r.play(Position::Center, Side::Host);
            Err(StoreError::new(StoreErrorKind::Corrupt, "rejected"))
        });
        assert_eq!(result.unwrap_err().kind(), StoreErrorKind::Corrupt);
        assert_eq!(store.get(name("alice"), name("bob")).unwrap(), record);
    }

    #[test]
    fn test_missing_key_operations_fail() {
        let mut store = MemoryStore::new();
        let get = store.get(name("alice"), name("bob")).unwrap_err();
        let modify = store
            .modify(name("alice"), name("bob"), |_| Ok::<_, StoreError>(()))
            .unwrap_err();
        let erase = store.erase(name("alice"), name("bob")).unwrap_err();
        for err in [get, modify, erase] {
            assert_eq!(err.kind(), StoreErrorKind::Missing);
        }
    }

    #[test]
    fn test_scope_lists_only_that_host() {
        let mut store = MemoryStore::new();
        for (host, challenger) in [("alice", "bob"), ("alice", "carol"), ("bob", "alice")] {
            store
                .insert(name(host), GameRecord::new(name(host), name(challenger)))
                .unwrap();
        }
        let games = store.scope(name("alice")).unwrap();
        assert_eq!(games.len(), 2);
        assert!(games.iter().all(|g| *g.host() == name("alice")));
        assert_eq!(store.len(), 3);
    }
}
