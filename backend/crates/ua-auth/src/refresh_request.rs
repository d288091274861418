use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct RefreshRequest {
    /// A refresh token previously issued by this service
    pub token: String,
}
