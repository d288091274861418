pub mod access_claims;
pub mod auth_service;
pub mod clock;
pub mod credential_hasher;
pub mod error;
pub mod google_id_token_verifier;
pub mod identity_verifier;
pub mod login_request;
pub mod oauth_service;
pub mod refresh_claims;
pub mod refresh_request;
pub mod register_request;
pub mod token_config;
pub mod token_pair;
pub mod token_service;
pub mod user_service;

pub use access_claims::AccessClaims;
pub use auth_service::AuthService;
pub use clock::{Clock, fixed_clock, system_clock};
pub use credential_hasher::CredentialHasher;
pub use error::{AuthError, Result};
pub use google_id_token_verifier::{GoogleIdTokenVerifier, GoogleVerifierConfig};
pub use identity_verifier::{FederatedClaims, IdentityVerifier};
pub use login_request::LoginRequest;
pub use oauth_service::{OAuthService, default_username};
pub use refresh_claims::RefreshClaims;
pub use refresh_request::RefreshRequest;
pub use register_request::RegisterRequest;
pub use token_config::TokenConfig;
pub use token_pair::TokenPair;
pub use token_service::TokenService;
pub use user_service::UserService;

#[cfg(test)]
mod tests;
