mod gender;
mod login_provider;
mod profile_update;
mod user;
