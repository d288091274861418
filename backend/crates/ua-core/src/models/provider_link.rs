//! Linked identity provider record - ties a user to a federated identity.

use crate::LoginProvider;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one record exists per (user, provider) pair. It is written only
/// on the first federated login, together with the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLink {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: LoginProvider,
    /// Provider-issued subject identifier (`sub`) of the verified assertion
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

impl ProviderLink {
    pub fn new(user_id: Uuid, provider: LoginProvider, subject: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            provider,
            subject,
            created_at: now,
        }
    }
}
