use ua_core::{DirectoryError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found {location}")]
    UserNotFound { location: ErrorLocation },

    #[error("Invalid password {location}")]
    InvalidPassword { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    TokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    TokenSigning {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Federated token rejected: {message} {location}")]
    FederatedTokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Federated token is missing required claim '{claim}' {location}")]
    FederatedClaimsMissing {
        claim: String,
        location: ErrorLocation,
    },

    /// Lost a uniqueness race in the directory. Retrying re-resolves the
    /// record the winner created.
    #[error("Directory conflict on '{field}' {location}")]
    DirectoryConflict {
        field: String,
        location: ErrorLocation,
    },

    #[error("Directory unavailable: {message} {location}")]
    Directory {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn token_invalid<S: Into<String>>(message: S) -> Self {
        Self::TokenInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing<S: Into<String>>(message: S) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn federated_token_invalid<S: Into<String>>(message: S) -> Self {
        Self::FederatedTokenInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn claims_missing<S: Into<String>>(claim: S) -> Self {
        Self::FederatedClaimsMissing {
            claim: claim.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::InvalidPassword { .. } => "INVALID_PASSWORD",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::TokenInvalid { .. } => "TOKEN_INVALID",
            Self::Hashing { .. } => "HASHING_FAILED",
            Self::TokenSigning { .. } => "TOKEN_SIGNING_FAILED",
            Self::FederatedTokenInvalid { .. } => "FEDERATED_TOKEN_INVALID",
            Self::FederatedClaimsMissing { .. } => "FEDERATED_CLAIMS_MISSING",
            Self::DirectoryConflict { .. } => "DIRECTORY_CONFLICT",
            Self::Directory { .. } => "DIRECTORY_UNAVAILABLE",
        }
    }

    /// Unknown account and wrong password must look the same to the caller.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. } | Self::InvalidPassword { .. }
        )
    }

    /// The presented token can no longer be used; the caller must sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::TokenExpired { .. } | Self::TokenInvalid { .. })
    }

    /// Only a lost email race resolves on retry: the second attempt finds
    /// the record the winner created. Other conflicts fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DirectoryConflict { field, .. } if field == "email")
    }
}

impl From<DirectoryError> for AuthError {
    #[track_caller]
    fn from(err: DirectoryError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DirectoryError::UserNotFound { .. } => Self::UserNotFound { location },
            DirectoryError::Conflict { field, .. } => Self::DirectoryConflict { field, location },
            DirectoryError::Storage { message, .. } => Self::Directory { message, location },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
