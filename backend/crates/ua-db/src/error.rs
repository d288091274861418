use ua_core::{DirectoryError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Unique violations become `Conflict` so callers can tell a lost race
/// apart from an unavailable store.
impl From<DbError> for DirectoryError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        if let DbError::Sqlx {
            source: sqlx::Error::Database(ref db_err),
            ..
        } = e
            && db_err.is_unique_violation()
        {
            return DirectoryError::Conflict {
                field: conflicting_field(db_err.message()).to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        DirectoryError::Storage {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Map a SQLite constraint message ("UNIQUE constraint failed: users.email")
/// to the logical field that collided.
pub(crate) fn conflicting_field(message: &str) -> &'static str {
    if message.contains("users.email") {
        "email"
    } else if message.contains("users.username") {
        "username"
    } else if message.contains("user_oauth_providers") {
        "provider"
    } else {
        "id"
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
