use crate::ServerResult;

use ua_auth::{
    AuthService, CredentialHasher, IdentityVerifier, OAuthService, TokenService, UserService,
};
use ua_core::UserDirectory;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared handler state. Every service is immutable after construction.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    /// None when Google sign-in is not configured
    pub oauth: Option<Arc<OAuthService>>,
    /// Backing pool, probed by `/ready`
    pub pool: Option<SqlitePool>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: Arc<TokenService>,
        hasher: CredentialHasher,
        verifier: Option<Arc<dyn IdentityVerifier>>,
    ) -> ServerResult<Self> {
        let auth = AuthService::new(directory.clone(), tokens.clone(), hasher)?;
        let users = UserService::new(directory.clone(), hasher, tokens.clock());
        let oauth = verifier
            .map(|verifier| Arc::new(OAuthService::new(directory, tokens.clone(), verifier)));

        Ok(Self {
            auth: Arc::new(auth),
            users: Arc::new(users),
            tokens,
            oauth,
            pool: None,
        })
    }

    pub fn with_pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }
}
