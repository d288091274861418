//! Process-local `UserDirectory` used by tests and ephemeral deployments.
//!
//! All checks and writes for one operation happen under a single write
//! lock, so the uniqueness guarantees match the SQLite repository.

use ua_core::{
    DirectoryError, DirectoryResult, ProviderLink, User, UserDirectory, normalize_email,
};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    links: Vec<ProviderLink>,
}

impl State {
    /// Reject `user` if any other record already holds its id, email or username.
    fn check_unique(&self, user: &User, is_insert: bool) -> DirectoryResult<()> {
        if is_insert && self.users.contains_key(&user.id) {
            return Err(DirectoryError::conflict("id"));
        }

        let email = normalize_email(&user.email);
        for existing in self.users.values().filter(|u| u.id != user.id) {
            if existing.email == email {
                return Err(DirectoryError::conflict("email"));
            }
            if existing.username == user.username {
                return Err(DirectoryError::conflict("username"));
            }
        }

        Ok(())
    }

    fn insert(&mut self, user: &User) {
        let mut stored = user.clone();
        stored.email = normalize_email(&user.email);
        self.users.insert(stored.id, stored);
    }
}

#[derive(Default)]
pub struct InMemoryUserDirectory {
    state: RwLock<State>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn provider_links(&self, user_id: Uuid) -> Vec<ProviderLink> {
        let state = self.state.read().await;
        state
            .links
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create(&self, user: &User) -> DirectoryResult<()> {
        let mut state = self.state.write().await;
        state.check_unique(user, true)?;
        state.insert(user);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DirectoryResult<User> {
        let state = self.state.read().await;
        state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(id.to_string()))
    }

    async fn get_by_email(&self, email: &str) -> DirectoryResult<User> {
        let email = normalize_email(email);
        let state = self.state.read().await;
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found("email"))
    }

    async fn create_user_and_provider_link(
        &self,
        user: &User,
        link: &ProviderLink,
    ) -> DirectoryResult<()> {
        let mut state = self.state.write().await;
        state.check_unique(user, true)?;
        if link.user_id != user.id {
            return Err(DirectoryError::storage(
                "Provider link does not reference the user being created",
            ));
        }
        if state
            .links
            .iter()
            .any(|l| l.user_id == link.user_id && l.provider == link.provider)
        {
            return Err(DirectoryError::conflict("provider"));
        }

        state.insert(user);
        state.links.push(link.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> DirectoryResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user.id) {
            return Err(DirectoryError::not_found(user.id.to_string()));
        }
        state.check_unique(user, false)?;
        state.insert(user);
        Ok(())
    }
}
