//! Errors surfaced by `UserDirectory` implementations.

use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// No user matches the lookup key
    #[error("User not found: {key} {location}")]
    UserNotFound {
        key: String,
        location: ErrorLocation,
    },

    /// A uniqueness constraint rejected the write. `field` names the
    /// column that collided (`email`, `username`, `provider`, `id`).
    #[error("Unique constraint violated on '{field}' {location}")]
    Conflict {
        field: String,
        location: ErrorLocation,
    },

    /// Backing store failed or is unreachable
    #[error("Directory storage error: {message} {location}")]
    Storage {
        message: String,
        location: ErrorLocation,
    },
}

impl DirectoryError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::UserNotFound {
            key: key.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict<S: Into<String>>(field: S) -> Self {
        Self::Conflict {
            field: field.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
