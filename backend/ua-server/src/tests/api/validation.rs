use crate::ApiError;
use crate::api::validation::{
    validate_email, validate_password, validate_phone, validate_profile_update,
    validate_registration, validate_username,
};

use ua_auth::RegisterRequest;
use ua_core::ProfileUpdate;

use googletest::prelude::*;

fn field_of(result: crate::ApiResult<()>) -> Option<String> {
    match result {
        Err(ApiError::Validation { field, .. }) => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        email: "alice@example.com".into(),
        password: "correct horse".into(),
        username: "alice".into(),
        full_name: "Alice Example".into(),
        phone: None,
        date_of_birth: None,
        gender: None,
        address: None,
    }
}

#[test]
fn test_email_shapes() {
    assert_that!(validate_email("alice@example.com"), ok(anything()));
    assert_that!(validate_email("  Alice@Example.COM "), ok(anything()));

    for bad in ["", "alice", "@example.com", "alice@", "alice@example", "a@b@c.com", "a b@c.com", "alice@.com"] {
        assert_that!(field_of(validate_email(bad)), some(eq("email")));
    }
}

#[test]
fn test_password_bounds() {
    assert_that!(validate_password("12345678"), ok(anything()));
    assert_that!(validate_password(&"a".repeat(72)), ok(anything()));
    assert_that!(field_of(validate_password("1234567")), some(eq("password")));
    assert_that!(field_of(validate_password(&"a".repeat(73))), some(eq("password")));
}

#[test]
fn test_username_bounds() {
    assert_that!(validate_username("abc"), ok(anything()));
    assert_that!(validate_username(&"u".repeat(50)), ok(anything()));
    assert_that!(field_of(validate_username("ab")), some(eq("username")));
    assert_that!(field_of(validate_username(&"u".repeat(51))), some(eq("username")));
}

#[test]
fn test_phone_bounds() {
    assert_that!(validate_phone("+1555010"), ok(anything()));
    assert_that!(field_of(validate_phone("5550100")), some(eq("phone")));
    assert_that!(field_of(validate_phone(&"5".repeat(21))), some(eq("phone")));
}

#[test]
fn test_registration_checks_optional_phone() {
    assert_that!(validate_registration(&registration()), ok(anything()));

    let mut request = registration();
    request.phone = Some("123".into());
    assert_that!(field_of(validate_registration(&request)), some(eq("phone")));

    let mut request = registration();
    request.full_name = "   ".into();
    assert_that!(field_of(validate_registration(&request)), some(eq("fullName")));
}

#[test]
fn test_empty_profile_update_is_rejected() {
    assert_that!(field_of(validate_profile_update(&ProfileUpdate::default())), none());
}

#[test]
fn test_profile_update_allows_clearing_phone() {
    let update = ProfileUpdate {
        phone: Some(String::new()),
        ..ProfileUpdate::default()
    };
    assert_that!(validate_profile_update(&update), ok(anything()));

    let update = ProfileUpdate {
        username: Some("x".into()),
        ..ProfileUpdate::default()
    };
    assert_that!(field_of(validate_profile_update(&update)), some(eq("username")));
}
