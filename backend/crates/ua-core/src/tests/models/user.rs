use crate::{LoginProvider, User, normalize_email};

use chrono::Utc;
use googletest::prelude::*;

#[test]
fn given_mixed_case_email_when_normalized_then_trimmed_and_lowercased() {
    assert_that!(normalize_email("  Alice@Example.COM "), eq("alice@example.com"));
}

#[test]
fn given_local_user_when_created_then_supports_local_login() {
    let now = Utc::now();
    let user = User::new_local(
        "A@X.com",
        "alice".to_string(),
        "Alice".to_string(),
        "$2b$04$hash".to_string(),
        now,
    );

    assert_that!(user.email, eq("a@x.com"));
    assert_that!(user.login_provider, eq(LoginProvider::Local));
    assert_that!(user.supports_local_login(), eq(true));
    assert_that!(user.created_at, eq(now));
    assert_that!(user.updated_at, eq(now));
    assert_that!(user.last_login_at, none());
}

#[test]
fn given_federated_user_when_created_then_has_no_password_hash() {
    let user = User::new_federated(
        "bob@x.com",
        "bob".to_string(),
        "Bob".to_string(),
        LoginProvider::Google,
        Utc::now(),
    );

    assert_that!(user.password_hash, none());
    assert_that!(user.supports_local_login(), eq(false));
    assert_that!(user.login_provider, eq(LoginProvider::Google));
}

#[test]
fn given_user_when_serialized_then_password_hash_is_omitted() {
    let user = User::new_local(
        "a@x.com",
        "alice".to_string(),
        "Alice".to_string(),
        "secret-digest".to_string(),
        Utc::now(),
    );

    let json = serde_json::to_string(&user).unwrap();

    assert_that!(json, not(contains_substring("secret-digest")));
    assert_that!(json, not(contains_substring("password_hash")));
}
