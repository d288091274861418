//! Storage capability consumed by the auth services.
//!
//! Implementations must enforce email and username uniqueness at write
//! time, and `create_user_and_provider_link` must be atomic: either both
//! records become visible or neither does.

use crate::{DirectoryResult, ProviderLink, User};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new user. Fails with `Conflict` on duplicate email/username.
    async fn create(&self, user: &User) -> DirectoryResult<()>;

    /// Fails with `UserNotFound` when no user has this id.
    async fn get_by_id(&self, id: Uuid) -> DirectoryResult<User>;

    /// Email lookup is case-insensitive. Fails with `UserNotFound` when absent.
    async fn get_by_email(&self, email: &str) -> DirectoryResult<User>;

    /// Insert a user together with its first linked identity provider record.
    async fn create_user_and_provider_link(
        &self,
        user: &User,
        link: &ProviderLink,
    ) -> DirectoryResult<()>;

    /// Overwrite the stored record with `user` (full-record update).
    async fn update(&self, user: &User) -> DirectoryResult<()>;
}
