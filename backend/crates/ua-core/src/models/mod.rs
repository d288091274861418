pub mod gender;
pub mod login_provider;
pub mod profile_update;
pub mod provider_link;
pub mod user;
