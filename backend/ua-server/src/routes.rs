use crate::{AppState, api, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Authentication
        .route("/api/v1/auth/register", post(api::auth::auth::register))
        .route("/api/v1/auth/login", post(api::auth::auth::login))
        .route("/api/v1/auth/refresh", post(api::auth::auth::refresh))
        .route(
            "/api/v1/auth/oauth/google",
            post(api::auth::auth::google_login),
        )
        // Profile (Bearer access token)
        .route(
            "/api/v1/profile",
            get(api::profile::profile::get_profile).put(api::profile::profile::update_profile),
        )
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
