use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token payload. `name` is a convenience copy of the display name
/// and may go stale until the next refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Display name at issuance
    pub name: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}
