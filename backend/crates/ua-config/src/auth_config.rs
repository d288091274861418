use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_REFRESH_TOKEN_TTL_SECS,
    MIN_SECRET_LENGTH,
};

use std::fmt;

use serde::Deserialize;

/// Token signing configuration. Access and refresh tokens are signed with
/// separate secrets.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_secret: Option<String>,
    pub refresh_secret: Option<String>,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: None,
            refresh_secret: None,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let access = Self::require_secret("auth.access_secret", &self.access_secret)?;
        let refresh = Self::require_secret("auth.refresh_secret", &self.refresh_secret)?;

        if access == refresh {
            return Err(ConfigError::auth(
                "auth.access_secret and auth.refresh_secret must differ",
            ));
        }

        if self.access_token_ttl_secs == 0 || self.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::auth("token TTLs must be greater than 0"));
        }

        if self.refresh_token_ttl_secs < self.access_token_ttl_secs {
            return Err(ConfigError::auth(format!(
                "auth.refresh_token_ttl_secs ({}) must be >= auth.access_token_ttl_secs ({})",
                self.refresh_token_ttl_secs, self.access_token_ttl_secs
            )));
        }

        Ok(())
    }

    #[track_caller]
    fn require_secret<'a>(name: &str, secret: &'a Option<String>) -> ConfigErrorResult<&'a str> {
        match secret.as_deref() {
            None | Some("") => Err(ConfigError::auth(format!("{} is required", name))),
            Some(s) if s.chars().count() < MIN_SECRET_LENGTH => Err(ConfigError::auth(format!(
                "{} must be at least {} characters",
                name, MIN_SECRET_LENGTH
            ))),
            Some(s) => Ok(s),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &Option<String>| s.as_ref().map(|_| "<redacted>");
        f.debug_struct("AuthConfig")
            .field("access_secret", &redact(&self.access_secret))
            .field("refresh_secret", &redact(&self.refresh_secret))
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .finish()
    }
}
