use ua_core::{LoginProvider, ProviderLink, User};

use chrono::{DateTime, Utc};

/// Whole seconds, matching the storage resolution
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_767_225_600, 0).expect("valid timestamp")
}

/// Creates a local-login User with a placeholder hash
pub fn create_test_user(email: &str, username: &str) -> User {
    User::new_local(
        email,
        username.to_string(),
        "Test User".to_string(),
        "$2b$04$placeholderplaceholderplaceholderplaceholderplace".to_string(),
        test_now(),
    )
}

/// Creates a Google-provisioned user and its provider link
pub fn create_test_federated_user(email: &str, username: &str, subject: &str) -> (User, ProviderLink) {
    let user = User::new_federated(
        email,
        username.to_string(),
        "Federated User".to_string(),
        LoginProvider::Google,
        test_now(),
    );
    let link = ProviderLink::new(user.id, LoginProvider::Google, subject.to_string(), test_now());
    (user, link)
}
