use chrono::FixedOffset;
use rusqlite::Error as SqliteError;

/// Result type alias for database handle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the database handle.
///
/// Engine failures are carried through untouched in [`Error::Sqlite`];
/// the remaining variants are local precondition failures raised before
/// anything reaches the connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A timestamp with a non-zero UTC offset was bound.
    #[error("must be UTC: got {value} with offset {offset}")]
    NotUtc { value: String, offset: FixedOffset },

    /// Conflict resolution keyword other than REPLACE, IGNORE or ROLLBACK.
    #[error("invalid insert fallback {0:?}, expected REPLACE, IGNORE or ROLLBACK")]
    InvalidFallback(String),

    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] SqliteError),
}

impl Error {
    /// Returns the underlying engine error, if this is one.
    pub fn as_sqlite(&self) -> Option<&SqliteError> {
        match self {
            Error::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "napi")]
pub fn to_napi_error(err: Error) -> napi::Error {
    match err {
        Error::Sqlite(err) => napi::Error::from_reason(format!("SQLite Error: {}", err)),
        other => napi::Error::from_reason(other.to_string()),
    }
}
