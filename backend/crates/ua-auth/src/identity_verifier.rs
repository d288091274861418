use crate::Result as AuthErrorResult;

use ua_core::LoginProvider;

use async_trait::async_trait;

/// Identity asserted by an external provider after its token has been
/// verified. Only `subject` is guaranteed; the rest is whatever the
/// provider chose to include.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FederatedClaims {
    /// Provider-issued stable user identifier (`sub`)
    pub subject: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
}

/// Verifies a raw provider token (signature, issuer, audience, expiry).
/// Failures are reported as `AuthError::FederatedTokenInvalid`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    fn provider(&self) -> LoginProvider;

    async fn verify(&self, raw_token: &str) -> AuthErrorResult<FederatedClaims>;
}
