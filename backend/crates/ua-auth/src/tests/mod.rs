
use crate::{
    AuthError, Clock, CredentialHasher, FederatedClaims, IdentityVerifier,
    Result as AuthErrorResult, TokenConfig, TokenService,
};

use ua_core::{LoginProvider, User};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

pub(crate) const ACCESS_SECRET: &str = "access-secret-at-least-32-bytes-long!!";
pub(crate) const REFRESH_SECRET: &str = "refresh-secret-at-least-32-bytes-long!";
pub(crate) const ACCESS_TTL_SECS: u64 = 900;
pub(crate) const REFRESH_TTL_SECS: u64 = 604_800;

pub(crate) fn test_config() -> TokenConfig {
    TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET, ACCESS_TTL_SECS, REFRESH_TTL_SECS)
}

/// Cheapest cost bcrypt accepts
pub(crate) fn test_hasher() -> CredentialHasher {
    CredentialHasher::new(4)
}

pub(crate) fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).unwrap()
}

/// Clock the test can move by hand
#[derive(Clone)]
pub(crate) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(crate) fn new(at: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(at)),
        }
    }

    pub(crate) fn clock(&self) -> Clock {
        let now = Arc::clone(&self.now);
        Arc::new(move || *now.lock().unwrap())
    }

    pub(crate) fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap() = at;
    }

    pub(crate) fn advance(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }
}

pub(crate) fn token_service(clock: &ManualClock) -> Arc<TokenService> {
    Arc::new(TokenService::new(clock.clock(), &test_config()))
}

pub(crate) fn local_user(email: &str, username: &str, password: &str) -> User {
    let digest = test_hasher().hash(password).unwrap();
    User::new_local(email, username.to_string(), "Test User".to_string(), digest, t0())
}

/// Verifier that accepts exactly one token and returns canned claims
pub(crate) struct StubVerifier {
    pub(crate) accepted_token: String,
    pub(crate) claims: FederatedClaims,
}

impl StubVerifier {
    pub(crate) fn google(email: Option<&str>, name: Option<&str>) -> Self {
        Self {
            accepted_token: "valid-google-token".to_string(),
            claims: FederatedClaims {
                subject: "google-sub-123".to_string(),
                email: email.map(str::to_string),
                email_verified: Some(true),
                name: name.map(str::to_string),
            },
        }
    }
}

#[async_trait]
impl IdentityVerifier for StubVerifier {
    fn provider(&self) -> LoginProvider {
        LoginProvider::Google
    }

    async fn verify(&self, raw_token: &str) -> AuthErrorResult<FederatedClaims> {
        if raw_token == self.accepted_token {
            Ok(self.claims.clone())
        } else {
            Err(AuthError::federated_token_invalid("signature mismatch"))
        }
    }
}
