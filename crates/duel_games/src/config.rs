//! Engine configuration.

use crate::Name;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "DUEL_DATABASE";

/// Runtime configuration, usually read from `duel.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DuelConfig {
    /// SQLite database file holding game records.
    #[serde(default = "default_database")]
    database: PathBuf,

    /// Account the dispatcher answers for.
    #[serde(default = "default_contract")]
    contract: Name,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_database() -> PathBuf {
    PathBuf::from("duel.db")
}

fn default_contract() -> Name {
    Name::from_static("tictactoe")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            contract: default_contract(),
            log_filter: default_log_filter(),
        }
    }
}

impl DuelConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(contract = %config.contract, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Reads `path` if given (it must exist), otherwise `duel.toml` in the
    /// working directory if present, otherwise defaults. `DUEL_DATABASE`
    /// then overrides the database path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named or discovered file is unusable.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new("duel.toml").exists() => Self::from_file("duel.toml")?,
            None => Self::default(),
        };

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            debug!(%database, "Database path overridden from environment");
            config.database = PathBuf::from(database);
        }
        Ok(config)
    }

    /// Replaces the database path.
    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
