//! SQLite-backed record store.

mod models;
mod schema;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::{RecordStore, StoreError, StoreErrorKind, check_address};
use crate::{GameRecord, Name};
use models::GameRow;
use schema::games;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on another process's write lock.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Record store persisted in a SQLite database file.
///
/// Each operation opens its own connection; `modify` runs its
/// read-mutate-write in an immediate transaction, so writers in other
/// processes queue behind it instead of overwriting its result.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

#[track_caller]
fn missing(scope: Name, key: Name) -> StoreError {
    StoreError::new(StoreErrorKind::Missing, format!("No record at {}/{}", scope, key))
}

/// Why a `modify` transaction rolled back.
enum Abort<E> {
    Store(StoreError),
    Rejected(E),
}

impl<E> From<StoreError> for Abort<E> {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl<E> From<diesel::result::Error> for Abort<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Store(err.into())
    }
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// Every operation reconnects, so `":memory:"` would lose the schema
    /// between calls; use a file path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref().display()))]
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.as_ref().to_path_buf(),
        };

        let mut conn = store.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            StoreError::new(StoreErrorKind::Backend, format!("Migrations failed: {}", e))
        })?;

        info!(path = %store.db_path.display(), migrations = applied.len(), "SqliteStore ready");
        Ok(store)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path.display(), "Establishing connection");
        let url = self.db_path.to_string_lossy();
        let mut conn = SqliteConnection::establish(&url).map_err(|e| {
            StoreError::new(
                StoreErrorKind::Backend,
                format!("Failed to connect to '{}': {}", url, e),
            )
        })?;
        // Wait for a competing writer instead of failing with SQLITE_BUSY.
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))
            .map_err(|e| {
                StoreError::new(
                    StoreErrorKind::Backend,
                    format!("Failed to set busy timeout: {}", e),
                )
            })?;
        Ok(conn)
    }

    fn find(
        conn: &mut SqliteConnection,
        scope: Name,
        key: Name,
    ) -> Result<Option<GameRow>, StoreError> {
        Ok(games::table
            .find((scope.to_string(), key.to_string()))
            .select(GameRow::as_select())
            .first(conn)
            .optional()?)
    }
}

impl RecordStore for SqliteStore {
    #[instrument(skip(self))]
    fn exists(&self, scope: Name, key: Name) -> Result<bool, StoreError> {
        let mut conn = self.connection()?;
        let found = diesel::select(diesel::dsl::exists(
            games::table.find((scope.to_string(), key.to_string())),
        ))
        .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    #[instrument(skip(self))]
    fn get(&self, scope: Name, key: Name) -> Result<GameRecord, StoreError> {
        let mut conn = self.connection()?;
        Self::find(&mut conn, scope, key)?
            .ok_or_else(|| missing(scope, key))?
            .into_record()
    }

    #[instrument(skip(self, record))]
    fn insert(&mut self, scope: Name, record: GameRecord) -> Result<(), StoreError> {
        let key = *record.challenger();
        check_address(scope, key, &record)?;

        let mut conn = self.connection()?;
        diesel::insert_into(games::table)
            .values(&GameRow::from(&record))
            .execute(&mut conn)?;

        debug!(%scope, %key, "Record inserted");
        Ok(())
    }

    #[instrument(skip(self, mutator))]
    fn modify<T, E, F>(&mut self, scope: Name, key: Name, mutator: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameRecord) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.connection()?;
        let result = conn.immediate_transaction::<_, Abort<E>, _>(|conn| {
            let mut record = Self::find(conn, scope, key)?
                .ok_or_else(|| missing(scope, key))?
                .into_record()?;
            let value = mutator(&mut record).map_err(Abort::Rejected)?;
            check_address(scope, key, &record)?;

            let row = GameRow::from(&record);
            let updated = diesel::update(games::table.find((scope.to_string(), key.to_string())))
                .set((
                    games::turn.eq(row.turn.as_str()),
                    games::winner.eq(row.winner),
                    games::board.eq(row.board.as_str()),
                ))
                .execute(conn)?;
            if updated != 1 {
                warn!(%scope, %key, updated, "Unexpected row count on update");
                return Err(missing(scope, key).into());
            }
            Ok(value)
        });

        match result {
            Ok(value) => {
                debug!(%scope, %key, "Record modified");
                Ok(value)
            }
            Err(Abort::Store(e)) => Err(e.into()),
            Err(Abort::Rejected(e)) => Err(e),
        }
    }

    #[instrument(skip(self))]
    fn erase(&mut self, scope: Name, key: Name) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(games::table.find((scope.to_string(), key.to_string())))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(missing(scope, key));
        }
        debug!(%scope, %key, "Record erased");
        Ok(())
    }

    #[instrument(skip(self))]
    fn scope(&self, scope: Name) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = self.connection()?;
        let rows: Vec<GameRow> = games::table
            .filter(games::host.eq(scope.to_string()))
            .order(games::challenger.asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;

        debug!(%scope, count = rows.len(), "Scope loaded");
        rows.into_iter().map(GameRow::into_record).collect()
    }
}
