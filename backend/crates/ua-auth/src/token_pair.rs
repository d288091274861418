use serde::{Deserialize, Serialize};

/// Result of every successful sign-in or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token expiry (Unix seconds)
    pub expires_at: i64,
}
