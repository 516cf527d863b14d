//! Record store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Broad category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StoreErrorKind {
    /// Insert hit an existing key.
    #[display("duplicate")]
    Duplicate,
    /// Lookup, modify or erase hit an absent key.
    #[display("missing")]
    Missing,
    /// A record's identities disagree with the address it is stored under.
    #[display("scope mismatch")]
    ScopeMismatch,
    /// Stored data could not be decoded.
    #[display("corrupt")]
    Corrupt,
    /// The backing engine failed.
    #[display("backend")]
    Backend,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Category of failure.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Category of failure.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match err {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::new(StoreErrorKind::Duplicate, info.message().to_string())
            }
            Error::NotFound => Self::new(StoreErrorKind::Missing, "Row not found"),
            other => Self::new(StoreErrorKind::Backend, format!("Diesel error: {}", other)),
        }
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StoreErrorKind::Backend, format!("Connection error: {}", err))
    }
}
