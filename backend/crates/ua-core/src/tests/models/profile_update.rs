use crate::{Gender, ProfileUpdate, User};

use chrono::{TimeZone, Utc};
use googletest::prelude::*;

fn sample_user() -> User {
    let mut user = User::new_local(
        "a@x.com",
        "alice".to_string(),
        "Alice".to_string(),
        "digest".to_string(),
        Utc::now(),
    );
    user.phone = Some("+1234567890".to_string());
    user.address = Some("1 Main St".to_string());
    user
}

#[test]
fn given_empty_update_when_applied_then_user_unchanged() {
    let mut user = sample_user();
    let before = user.clone();

    let update = ProfileUpdate::default();
    assert_that!(update.is_empty(), eq(true));
    update.apply_to(&mut user);

    assert_that!(user, eq(&before));
}

#[test]
fn given_partial_update_when_applied_then_only_present_fields_change() {
    let mut user = sample_user();
    let dob = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();

    ProfileUpdate {
        full_name: Some("Alice Liddell".to_string()),
        date_of_birth: Some(dob),
        gender: Some(Gender::Female),
        ..Default::default()
    }
    .apply_to(&mut user);

    assert_that!(user.full_name, eq("Alice Liddell"));
    assert_that!(user.date_of_birth, some(eq(dob)));
    assert_that!(user.gender, some(eq(Gender::Female)));
    assert_that!(user.username, eq("alice"));
    assert_that!(user.phone.as_deref(), some(eq("+1234567890")));
    assert_that!(user.address.as_deref(), some(eq("1 Main St")));
}

#[test]
fn given_field_set_to_empty_string_when_applied_then_field_is_cleared_not_skipped() {
    let mut user = sample_user();

    ProfileUpdate {
        address: Some(String::new()),
        ..Default::default()
    }
    .apply_to(&mut user);

    assert_that!(user.address.as_deref(), some(eq("")));
    assert_that!(user.phone.as_deref(), some(eq("+1234567890")));
}

#[test]
fn given_camel_case_json_with_missing_fields_when_deserialized_then_missing_are_none() {
    let update: ProfileUpdate =
        serde_json::from_str(r#"{"fullName": "Bob", "avatarUrl": "https://x/a.png"}"#).unwrap();

    assert_that!(update.full_name.as_deref(), some(eq("Bob")));
    assert_that!(update.avatar_url.as_deref(), some(eq("https://x/a.png")));
    assert_that!(update.username, none());
    assert_that!(update.phone, none());
}
