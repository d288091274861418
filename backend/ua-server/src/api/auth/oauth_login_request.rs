use serde::Deserialize;

/// Body of `POST /api/v1/auth/oauth/google`
#[derive(Clone, Deserialize)]
pub struct OAuthLoginRequest {
    /// Provider-issued identity token (Google ID token)
    pub token: String,
}
