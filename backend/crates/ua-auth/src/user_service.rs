//! Registration and profile reads/updates.

use crate::{Clock, CredentialHasher, RegisterRequest, Result as AuthErrorResult};

use ua_core::{ProfileUpdate, User, UserDirectory};

use std::sync::Arc;

use uuid::Uuid;

pub struct UserService {
    directory: Arc<dyn UserDirectory>,
    hasher: CredentialHasher,
    clock: Clock,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: CredentialHasher, clock: Clock) -> Self {
        Self {
            directory,
            hasher,
            clock,
        }
    }

    /// Create a password account. A taken email or username surfaces as
    /// `DirectoryConflict`.
    pub async fn register(&self, request: RegisterRequest) -> AuthErrorResult<User> {
        let digest = self.hasher.hash_blocking(request.password).await?;

        let mut user = User::new_local(
            &request.email,
            request.username,
            request.full_name,
            digest,
            (self.clock)(),
        );
        user.phone = request.phone;
        user.date_of_birth = request.date_of_birth;
        user.gender = request.gender;
        user.address = request.address;

        self.directory.create(&user).await?;
        log::info!("Registered user {}", user.id);

        Ok(user)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AuthErrorResult<User> {
        Ok(self.directory.get_by_id(user_id).await?)
    }

    /// Read the user, merge the present fields, write the full record back.
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> AuthErrorResult<()> {
        let mut user = self.directory.get_by_id(user_id).await?;

        update.apply_to(&mut user);
        user.updated_at = (self.clock)();

        self.directory.update(&user).await?;
        log::debug!("Updated profile for user {}", user_id);

        Ok(())
    }
}
