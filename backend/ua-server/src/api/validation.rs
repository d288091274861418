//! Input validation for request bodies.
//!
//! Gender values are checked by deserialization; everything else here.

use crate::{ApiError, ApiResult};

use ua_auth::RegisterRequest;
use ua_core::ProfileUpdate;

pub const MIN_PASSWORD_LEN: usize = 8;
/// bcrypt only reads the first 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PHONE_LEN: usize = 8;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_FULL_NAME_LEN: usize = 100;

pub fn validate_registration(request: &RegisterRequest) -> ApiResult<()> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_username(&request.username)?;
    validate_full_name(&request.full_name)?;
    if let Some(ref phone) = request.phone {
        validate_phone(phone)?;
    }
    Ok(())
}

pub fn validate_profile_update(update: &ProfileUpdate) -> ApiResult<()> {
    if update.is_empty() {
        return Err(ApiError::bad_request("At least one field must be provided"));
    }
    if let Some(ref username) = update.username {
        validate_username(username)?;
    }
    if let Some(ref full_name) = update.full_name {
        validate_full_name(full_name)?;
    }
    // An empty phone clears the field
    if let Some(ref phone) = update.phone
        && !phone.is_empty()
    {
        validate_phone(phone)?;
    }
    Ok(())
}

/// Deliberately loose: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email address", "email"))
    }
}

pub fn validate_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            "password",
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ApiError::validation(
            format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
            "password",
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> ApiResult<()> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(ApiError::validation(
            format!("Username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters"),
            "username",
        ));
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> ApiResult<()> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Full name cannot be empty", "fullName"));
    }
    if trimmed.chars().count() > MAX_FULL_NAME_LEN {
        return Err(ApiError::validation(
            format!("Full name must be at most {MAX_FULL_NAME_LEN} characters"),
            "fullName",
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> ApiResult<()> {
    let len = phone.chars().count();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) {
        return Err(ApiError::validation(
            format!("Phone must be {MIN_PHONE_LEN}-{MAX_PHONE_LEN} characters"),
            "phone",
        ));
    }
    Ok(())
}
