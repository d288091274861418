use ua_core::{Gender, LoginProvider, User};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub login_provider: LoginProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            phone: user.phone,
            date_of_birth: user.date_of_birth,
            gender: user.gender,
            address: user.address,
            avatar_url: user.avatar_url,
            login_provider: user.login_provider,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
