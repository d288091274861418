//! Authentication endpoints

use crate::api::validation::{validate_email, validate_registration};
use crate::{ApiError, ApiResult, AppState, OAuthLoginRequest, RegisterResponse};

use ua_auth::{AuthError, LoginRequest, RefreshRequest, RegisterRequest, TokenPair};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    validate_registration(&request)?;

    state.users.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(ApiError::validation("Password is required", "password"));
    }

    let pair = state.auth.generate_token(request).await?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;
    if request.token.is_empty() {
        return Err(ApiError::validation("Refresh token is required", "token"));
    }

    // A deleted account is a dead session, not a credentials problem
    let pair = state.auth.refresh_token(request).await.map_err(|e| match e {
        AuthError::UserNotFound { .. } => ApiError::unauthorized("User no longer exists"),
        other => other.into(),
    })?;
    Ok(Json(pair))
}

/// POST /api/v1/auth/oauth/google
///
/// A concurrent first login for the same email can lose the insert race;
/// retrying once resolves to the account the winner created.
pub async fn google_login(
    State(state): State<AppState>,
    payload: Result<Json<OAuthLoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;
    if request.token.is_empty() {
        return Err(ApiError::validation("Identity token is required", "token"));
    }

    let oauth = state
        .oauth
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Google sign-in is not configured"))?;

    let pair = match oauth.federated_login(&request.token).await {
        Err(e) if e.is_retryable() => {
            log::info!("Federated login lost an email race, retrying once");
            oauth
                .federated_login(&request.token)
                .await
                .map_err(ApiError::from_federated)?
        }
        result => result.map_err(ApiError::from_federated)?,
    };

    Ok(Json(pair))
}
