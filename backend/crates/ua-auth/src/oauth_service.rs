//! Federated sign-in with account linking by email.
//!
//! An existing account with the asserted email is reused whatever its
//! original login provider. A new email provisions a password-less user and
//! its provider link in one atomic directory write. When two first-time
//! logins race, the loser gets `DirectoryConflict { field: "email" }` and a
//! retry finds the winner's record. A taken username gets an id suffix.

use crate::auth_service::record_login;
use crate::{
    AuthError, FederatedClaims, IdentityVerifier, Result as AuthErrorResult, TokenPair,
    TokenService,
};

use ua_core::{ProviderLink, User, UserDirectory, normalize_email};

use std::sync::Arc;

use uuid::Uuid;

pub struct OAuthService {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
    verifier: Arc<dyn IdentityVerifier>,
}

impl OAuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenService>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            directory,
            tokens,
            verifier,
        }
    }

    pub async fn federated_login(&self, provider_token: &str) -> AuthErrorResult<TokenPair> {
        let claims = self
            .verifier
            .verify(provider_token)
            .await
            .inspect_err(|e| log::warn!("Federated token rejected: {}", e))?;

        let email = claims
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::claims_missing("email"))?;
        if claims.email_verified == Some(false) {
            return Err(AuthError::claims_missing("email_verified"));
        }
        if claims.subject.is_empty() {
            return Err(AuthError::claims_missing("sub"));
        }

        let mut user = match self.directory.get_by_email(&email).await {
            Ok(user) => {
                log::debug!("Federated login matched existing user {}", user.id);
                user
            }
            Err(e) if e.is_not_found() => self.provision(&email, &claims).await?,
            Err(e) => return Err(e.into()),
        };

        user.last_login_at = Some(self.tokens.now());
        record_login(self.directory.as_ref(), &user).await;

        self.tokens.issue_pair(&user)
    }

    async fn provision(&self, email: &str, claims: &FederatedClaims) -> AuthErrorResult<User> {
        let provider = self.verifier.provider();
        let now = self.tokens.now();
        let username = default_username(email);
        let full_name = claims
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.clone());

        let user = User::new_federated(email, username.clone(), full_name.clone(), provider, now);
        match self.insert_with_link(&user, &claims.subject).await {
            Err(AuthError::DirectoryConflict { ref field, .. }) if field == "username" => {
                let mut user = User::new_federated(email, String::new(), full_name, provider, now);
                user.username = suffixed_username(&username, user.id);
                log::info!(
                    "Username '{}' taken, provisioning as '{}'",
                    username,
                    user.username
                );
                self.insert_with_link(&user, &claims.subject).await?;
                Ok(user)
            }
            Err(e) => Err(e),
            Ok(()) => Ok(user),
        }
    }

    async fn insert_with_link(&self, user: &User, subject: &str) -> AuthErrorResult<()> {
        let provider = self.verifier.provider();
        let link = ProviderLink::new(user.id, provider, subject.to_string(), user.created_at);

        self.directory
            .create_user_and_provider_link(user, &link)
            .await?;
        log::info!("Provisioned user {} via {}", user.id, provider);

        Ok(())
    }
}

/// Username candidate for a provisioned account: the email local-part.
pub fn default_username(email: &str) -> String {
    email
        .split_once('@')
        .map_or(email, |(local, _)| local)
        .to_string()
}

/// Fallback when the local-part is already someone's username.
fn suffixed_username(base: &str, id: Uuid) -> String {
    let id = id.simple().to_string();
    format!("{}-{}", base, &id[..8])
}
