//! Password sign-in and refresh-token exchange.

use crate::{
    AuthError, CredentialHasher, LoginRequest, RefreshRequest, Result as AuthErrorResult,
    TokenPair, TokenService,
};

use ua_core::{ErrorLocation, User, UserDirectory};

use std::panic::Location;
use std::sync::Arc;

/// Verified against when the account is unknown or has no password, so
/// both outcomes cost one bcrypt verification.
const DUMMY_PASSWORD: &str = "not-a-real-password";

pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
    hasher: CredentialHasher,
    dummy_digest: String,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenService>,
        hasher: CredentialHasher,
    ) -> AuthErrorResult<Self> {
        Ok(Self {
            directory,
            tokens,
            hasher,
            dummy_digest: hasher.hash(DUMMY_PASSWORD)?,
        })
    }

    /// Sign in with email and password.
    ///
    /// Fails with `UserNotFound` or `InvalidPassword`; callers must present
    /// both as the same "invalid credentials" outcome.
    pub async fn generate_token(&self, request: LoginRequest) -> AuthErrorResult<TokenPair> {
        let user = match self.directory.get_by_email(&request.email).await {
            Ok(user) => Some(user),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        let digest = user
            .as_ref()
            .and_then(|u| u.password_hash.clone())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| self.dummy_digest.clone());
        let matched = self
            .hasher
            .verify_blocking(digest, request.password)
            .await?;

        let Some(mut user) = user else {
            log::warn!("Login rejected: unknown account");
            return Err(AuthError::UserNotFound {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !user.supports_local_login() || !matched {
            log::warn!("Login rejected for user {}: bad password", user.id);
            return Err(AuthError::InvalidPassword {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        user.last_login_at = Some(self.tokens.now());
        record_login(self.directory.as_ref(), &user).await;

        self.tokens.issue_pair(&user)
    }

    /// Exchange a refresh token for a new access token and a new refresh
    /// token. The presented refresh token is not revoked.
    pub async fn refresh_token(&self, request: RefreshRequest) -> AuthErrorResult<TokenPair> {
        let claims = self
            .tokens
            .parse_refresh_token(&request.token)
            .inspect_err(|e| log::warn!("Refresh rejected: {}", e.error_code()))?;

        let user = self.directory.get_by_id(claims.sub).await?;
        log::debug!("Refreshing tokens for user {}", user.id);

        self.tokens.issue_pair(&user)
    }
}

/// Persist `last_login_at`. A failed write does not fail the sign-in.
pub(crate) async fn record_login(directory: &dyn UserDirectory, user: &User) {
    if let Err(e) = directory.update(user).await {
        log::warn!("Failed to record last login for user {}: {}", user.id, e);
    }
}
