#[allow(clippy::module_inception)]
pub mod auth;
pub mod oauth_login_request;
pub mod register_response;
