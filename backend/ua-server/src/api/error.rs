//! REST API error types
//!
//! Every failure becomes a JSON body of the form
//! `{"error": {"code", "message", "field"?, "retryable"?}}`.

use ua_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "INVALID_CREDENTIALS", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Field name if the error is tied to one input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Present (true) only on conflicts a plain retry resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown user or wrong password (401). The body never says which.
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Missing, malformed or expired token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Uniqueness conflict (409). `retryable` only for a lost first-login race.
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        field: Option<String>,
        retryable: bool,
        location: ErrorLocation,
    },

    /// Feature not configured (503)
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500). `message` is logged, never returned.
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: &str) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Validation failure not tied to a single field
    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidCredentials { .. } => {
                log::warn!("{}", self);
                (
                    StatusCode::UNAUTHORIZED,
                    body("INVALID_CREDENTIALS", "Invalid email or password", None),
                )
            }
            ApiError::Unauthorized { .. } => {
                log::warn!("{}", self);
                (
                    StatusCode::UNAUTHORIZED,
                    body("UNAUTHORIZED", "Invalid or expired token, please re-authenticate", None),
                )
            }
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                body("VALIDATION_ERROR", &message, field),
            ),
            ApiError::Conflict {
                message,
                field,
                retryable,
                ..
            } => {
                let mut conflict = body("CONFLICT", &message, field);
                conflict.retryable = retryable.then_some(true);
                (StatusCode::CONFLICT, conflict)
            }
            ApiError::ServiceUnavailable { message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                body("SERVICE_UNAVAILABLE", &message, None),
            ),
            ApiError::Internal { .. } => {
                log::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body("INTERNAL_ERROR", "Internal server error", None),
                )
            }
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

fn body(code: &str, message: &str, field: Option<String>) -> ApiErrorBody {
    ApiErrorBody {
        code: code.to_string(),
        message: message.to_string(),
        field,
        retryable: None,
    }
}

/// Convert core auth failures to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            AuthError::UserNotFound { .. } | AuthError::InvalidPassword { .. } => {
                ApiError::InvalidCredentials { location }
            }
            AuthError::TokenExpired { .. }
            | AuthError::TokenInvalid { .. }
            | AuthError::FederatedTokenInvalid { .. } => ApiError::Unauthorized {
                message: e.to_string(),
                location,
            },
            AuthError::FederatedClaimsMissing { claim, .. } => ApiError::Validation {
                message: format!("Identity token is missing a usable '{claim}' claim"),
                field: Some(claim),
                location,
            },
            AuthError::DirectoryConflict { field, .. } => ApiError::Conflict {
                message: format!("A user with this {field} already exists"),
                field: Some(field),
                retryable: false,
                location,
            },
            AuthError::Hashing { .. }
            | AuthError::TokenSigning { .. }
            | AuthError::Directory { .. } => ApiError::Internal {
                message: e.to_string(),
                location,
            },
        }
    }
}

impl ApiError {
    /// Federated sign-in failure. A lost first-login race on the email is the
    /// one conflict the client can resolve by simply retrying.
    #[track_caller]
    pub fn from_federated(e: AuthError) -> Self {
        let retryable = e.is_retryable();
        match ApiError::from(e) {
            ApiError::Conflict {
                message,
                field,
                location,
                ..
            } => ApiError::Conflict {
                message,
                field,
                retryable,
                location,
            },
            other => other,
        }
    }
}

/// Malformed or missing JSON bodies
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: rejection.body_text(),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
