//! User identity - the account record shared by local and federated login.

use crate::{Gender, LoginProvider};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Email and username are globally unique. `password_hash` is present
/// iff the account supports local (password) login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Stored normalized (see `normalize_email`)
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    // Profile
    pub full_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,

    pub login_provider: LoginProvider,
    pub last_login_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an account that signs in with a password
    pub fn new_local(
        email: &str,
        username: String,
        full_name: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self::blank(email, username, full_name, LoginProvider::Local, Some(password_hash), now)
    }

    /// Create an account provisioned by a federated login (no password)
    pub fn new_federated(
        email: &str,
        username: String,
        full_name: String,
        provider: LoginProvider,
        now: DateTime<Utc>,
    ) -> Self {
        Self::blank(email, username, full_name, provider, None, now)
    }

    fn blank(
        email: &str,
        username: String,
        full_name: String,
        login_provider: LoginProvider,
        password_hash: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            username,
            password_hash,
            full_name,
            phone: None,
            date_of_birth: None,
            gender: None,
            address: None,
            avatar_url: None,
            login_provider,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account can authenticate with a password
    pub fn supports_local_login(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Canonical form used for storage and lookup: trimmed, lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
