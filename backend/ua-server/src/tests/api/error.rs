use crate::ApiError;

use ua_auth::AuthError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_render_identically() {
    let (status_a, json_a) = render(
        AuthError::UserNotFound {
            location: ErrorLocation::from(Location::caller()),
        }
        .into(),
    )
    .await;
    let (status_b, json_b) = render(
        AuthError::InvalidPassword {
            location: ErrorLocation::from(Location::caller()),
        }
        .into(),
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(json_a, json_b);
    assert_eq!(json_a["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_expired_token_returns_401_unauthorized() {
    let (status, json) = render(
        AuthError::TokenExpired {
            location: ErrorLocation::from(Location::caller()),
        }
        .into(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("re-authenticate")
    );
}

#[tokio::test]
async fn test_federated_token_invalid_returns_401() {
    let (status, json) = render(AuthError::federated_token_invalid("bad signature").into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_claims_missing_returns_400_with_claim_as_field() {
    let (status, json) = render(AuthError::claims_missing("email").into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_federated_email_conflict_returns_409_retryable() {
    let (status, json) = render(ApiError::from_federated(AuthError::DirectoryConflict {
        field: "email".into(),
        location: ErrorLocation::from(Location::caller()),
    }))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["field"], "email");
    assert_eq!(json["error"]["retryable"], true);
}

#[tokio::test]
async fn test_federated_username_conflict_returns_409_without_retryable() {
    let (status, json) = render(ApiError::from_federated(AuthError::DirectoryConflict {
        field: "username".into(),
        location: ErrorLocation::from(Location::caller()),
    }))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["field"], "username");
    assert!(json["error"].get("retryable").is_none());
}

#[tokio::test]
async fn test_registration_email_conflict_is_not_retryable() {
    let (status, json) = render(
        AuthError::DirectoryConflict {
            field: "email".into(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into(),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].get("retryable").is_none());
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let (status, json) = render(
        AuthError::Directory {
            message: "disk I/O error at /var/lib/users.db".into(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json["error"]["message"].as_str().unwrap().contains("users.db"));
}

#[tokio::test]
async fn test_service_unavailable_returns_503() {
    let (status, json) = render(ApiError::service_unavailable("Google sign-in is not configured")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    assert!(json["error"].get("field").is_none());
    assert!(json["error"].get("retryable").is_none());
}
