use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_GOOGLE_ISSUERS, DEFAULT_GOOGLE_JWKS_URL,
    DEFAULT_JWKS_CACHE_TTL_SECS, DEFAULT_JWKS_TIMEOUT_SECS,
};

use serde::Deserialize;
use std::net::Ipv4Addr;
use url::{Host, Url};

/// Google Sign-In settings. Federated login is disabled while
/// `google_client_id` is unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub google_client_id: Option<String>,
    pub issuers: Vec<String>,
    pub jwks_url: String,
    pub jwks_timeout_secs: u64,
    pub jwks_cache_ttl_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: None,
            issuers: DEFAULT_GOOGLE_ISSUERS.iter().map(|s| s.to_string()).collect(),
            jwks_url: String::from(DEFAULT_GOOGLE_JWKS_URL),
            jwks_timeout_secs: DEFAULT_JWKS_TIMEOUT_SECS,
            jwks_cache_ttl_secs: DEFAULT_JWKS_CACHE_TTL_SECS,
        }
    }
}

impl OAuthConfig {
    pub fn is_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some(client_id) = &self.google_client_id else {
            return Ok(());
        };

        if client_id.trim().is_empty() {
            return Err(ConfigError::oauth("oauth.google_client_id cannot be empty"));
        }

        if self.issuers.is_empty() {
            return Err(ConfigError::oauth("oauth.issuers cannot be empty"));
        }

        if !is_secure_url(&self.jwks_url) {
            return Err(ConfigError::oauth(format!(
                "oauth.jwks_url must use https, got {}",
                self.jwks_url
            )));
        }

        if self.jwks_timeout_secs == 0 {
            return Err(ConfigError::oauth("oauth.jwks_timeout_secs must be > 0"));
        }

        Ok(())
    }
}

/// https, or plain http on loopback
fn is_secure_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match parsed.scheme() {
        "https" => true,
        "http" => matches!(
            parsed.host(),
            Some(Host::Domain("localhost")) | Some(Host::Ipv4(Ipv4Addr::LOCALHOST))
        ),
        _ => false,
    }
}
