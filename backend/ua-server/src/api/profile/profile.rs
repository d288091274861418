//! Profile endpoints for the authenticated user

use crate::api::validation::validate_profile_update;
use crate::{ApiError, ApiResult, AppState, AuthenticatedUser, ProfileDto};

use ua_auth::AuthError;
use ua_core::ProfileUpdate;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<ProfileDto>> {
    let user = state
        .users
        .get_profile(caller.user_id)
        .await
        .map_err(account_gone)?;

    Ok(Json(ProfileDto::from(user)))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(update) = payload?;
    validate_profile_update(&update)?;

    state
        .users
        .update_profile(caller.user_id, update)
        .await
        .map_err(account_gone)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A valid token for a deleted account
fn account_gone(e: AuthError) -> ApiError {
    match e {
        AuthError::UserNotFound { .. } => ApiError::unauthorized("User no longer exists"),
        other => other.into(),
    }
}
