#![allow(dead_code)]

use ua_server::{AppState, build_router};

use ua_auth::{
    AuthError, Clock, CredentialHasher, FederatedClaims, IdentityVerifier, Result as AuthResult,
    TokenConfig, TokenService, fixed_clock, system_clock,
};
use ua_core::{LoginProvider, UserDirectory};
use ua_db::InMemoryUserDirectory;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ACCESS_SECRET: &str = "server-access-secret-at-least-32-bytes";
pub const REFRESH_SECRET: &str = "server-refresh-secret-at-least-32-byte";
pub const GOOGLE_TOKEN: &str = "valid-google-token";

pub struct TestApp {
    pub router: Router,
    pub directory: Arc<InMemoryUserDirectory>,
}

/// Accepts `GOOGLE_TOKEN` only, asserting a fixed verified identity
pub struct StubGoogleVerifier {
    pub claims: FederatedClaims,
}

#[async_trait]
impl IdentityVerifier for StubGoogleVerifier {
    fn provider(&self) -> LoginProvider {
        LoginProvider::Google
    }

    async fn verify(&self, raw_token: &str) -> AuthResult<FederatedClaims> {
        if raw_token == GOOGLE_TOKEN {
            Ok(self.claims.clone())
        } else {
            Err(AuthError::federated_token_invalid("unknown test token"))
        }
    }
}

pub fn google_claims(email: &str) -> FederatedClaims {
    FederatedClaims {
        subject: "google-sub-1".to_string(),
        email: Some(email.to_string()),
        email_verified: Some(true),
        name: Some("Google User".to_string()),
    }
}

fn build(
    directory: Arc<InMemoryUserDirectory>,
    clock: Clock,
    verifier: Option<Arc<dyn IdentityVerifier>>,
) -> TestApp {
    let tokens = Arc::new(TokenService::new(
        clock,
        &TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET, 900, 604_800),
    ));
    let shared: Arc<dyn UserDirectory> = directory.clone();
    let state = AppState::new(shared, tokens, CredentialHasher::new(4), verifier).unwrap();

    TestApp {
        router: build_router(state),
        directory,
    }
}

/// Router over an empty in-memory directory, Google sign-in enabled
pub fn test_app() -> TestApp {
    test_app_with_verifier(Some(Arc::new(StubGoogleVerifier {
        claims: google_claims("gina@example.com"),
    })))
}

pub fn test_app_with_verifier(verifier: Option<Arc<dyn IdentityVerifier>>) -> TestApp {
    build(Arc::new(InMemoryUserDirectory::new()), system_clock(), verifier)
}

/// Second router over the same directory whose clock is frozen at `at`
pub fn app_at(directory: Arc<InMemoryUserDirectory>, at: DateTime<Utc>) -> TestApp {
    build(directory, fixed_clock(at), None)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub fn registration(email: &str, username: &str) -> Value {
    serde_json::json!({
        "email": email,
        "password": "correct horse battery",
        "username": username,
        "fullName": "Test User",
    })
}

/// Register then log in, returning the token pair body
pub async fn register_and_login(app: &TestApp, email: &str, username: &str) -> Value {
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(registration(email, username)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({ "email": email, "password": "correct horse battery" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}
