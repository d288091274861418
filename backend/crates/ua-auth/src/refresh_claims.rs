use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Refresh-token payload. Carries no profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}
