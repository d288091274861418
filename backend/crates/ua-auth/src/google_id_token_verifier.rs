//! Google Sign-In ID token verification.
//!
//! Signing keys come from the provider's JWKS endpoint and are cached for
//! `jwks_cache_ttl`. A token signed with a `kid` missing from the cache
//! triggers a refetch, which picks up key rotation, but never more often
//! than `min_refetch_interval`.

use crate::{AuthError, Clock, FederatedClaims, IdentityVerifier, Result as AuthErrorResult};

use ua_core::LoginProvider;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Deserializer};
use tokio::sync::RwLock;

pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Allowed drift between our clock and the provider's
const CLOCK_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct GoogleVerifierConfig {
    /// OAuth client id; must equal the token's `aud`
    pub client_id: String,
    pub issuers: Vec<String>,
    pub jwks_url: String,
    pub jwks_cache_ttl: Duration,
    /// Unknown `kid`s inside this window fail without another fetch
    pub min_refetch_interval: Duration,
    pub http_timeout: Duration,
}

impl GoogleVerifierConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            issuers: GOOGLE_ISSUERS.iter().map(|s| s.to_string()).collect(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
            jwks_cache_ttl: Duration::from_secs(3600),
            min_refetch_interval: Duration::from_secs(60),
            http_timeout: Duration::from_secs(5),
        }
    }
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

#[derive(Deserialize)]
struct GoogleIdClaims {
    sub: String,
    exp: i64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "bool_or_string")]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

pub struct GoogleIdTokenVerifier {
    config: GoogleVerifierConfig,
    client: ReqwestClient,
    clock: Clock,
    validation: Validation,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdTokenVerifier {
    pub fn new(config: GoogleVerifierConfig, clock: Clock) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.client_id.as_str()]);
        validation.set_issuer(&config.issuers);
        validation.validate_exp = false; // checked against the injected clock
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        Self {
            config,
            client: ReqwestClient::new(),
            clock,
            validation,
            cache: RwLock::new(None),
        }
    }

    async fn decoding_key(&self, kid: &str) -> AuthErrorResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && cached.fetched_at.elapsed() < self.config.jwks_cache_ttl
                && let Some(jwk) = cached.keys.find(kid)
            {
                return key_from_jwk(jwk);
            }
        }

        // Fetches are serialized; re-check what the previous holder stored
        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref() {
            let age = cached.fetched_at.elapsed();
            if age < self.config.jwks_cache_ttl
                && let Some(jwk) = cached.keys.find(kid)
            {
                return key_from_jwk(jwk);
            }
            if age < self.config.min_refetch_interval {
                log::warn!("Unknown signing key '{}', keys refreshed {:?} ago", kid, age);
                return Err(unknown_key(kid));
            }
        }

        let keys = self.fetch_keys().await?;
        let key = keys.find(kid).map(key_from_jwk);
        *cache = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        key.unwrap_or_else(|| Err(unknown_key(kid)))
    }

    async fn fetch_keys(&self) -> AuthErrorResult<JwkSet> {
        log::debug!("Fetching provider signing keys from {}", self.config.jwks_url);

        let response = self
            .client
            .get(&self.config.jwks_url)
            .timeout(self.config.http_timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                log::warn!("Signing key fetch failed: {}", e);
                AuthError::federated_token_invalid(format!("signing keys unavailable: {}", e))
            })?;

        response.json::<JwkSet>().await.map_err(|e| {
            AuthError::federated_token_invalid(format!("malformed signing key set: {}", e))
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdTokenVerifier {
    fn provider(&self) -> LoginProvider {
        LoginProvider::Google
    }

    async fn verify(&self, raw_token: &str) -> AuthErrorResult<FederatedClaims> {
        let header = decode_header(raw_token)
            .map_err(|e| AuthError::federated_token_invalid(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::federated_token_invalid("token header has no 'kid'"))?;

        let key = self.decoding_key(&kid).await?;
        let claims = decode::<GoogleIdClaims>(raw_token, &key, &self.validation)
            .map_err(|e| AuthError::federated_token_invalid(e.to_string()))?
            .claims;

        if (self.clock)().timestamp() >= claims.exp.saturating_add(CLOCK_SKEW_SECS) {
            return Err(AuthError::federated_token_invalid("token expired"));
        }
        if claims.sub.is_empty() {
            return Err(AuthError::federated_token_invalid("empty 'sub'"));
        }

        Ok(FederatedClaims {
            subject: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified,
            name: claims.name,
        })
    }
}

#[track_caller]
fn unknown_key(kid: &str) -> AuthError {
    AuthError::federated_token_invalid(format!("unknown signing key '{}'", kid))
}

#[track_caller]
fn key_from_jwk(jwk: &Jwk) -> AuthErrorResult<DecodingKey> {
    DecodingKey::from_jwk(jwk)
        .map_err(|e| AuthError::federated_token_invalid(format!("unusable signing key: {}", e)))
}

/// Google has emitted `email_verified` both as a JSON bool and as a string.
fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => None,
        Some(Flag::Bool(value)) => Some(value),
        Some(Flag::Text(text)) => Some(text.eq_ignore_ascii_case("true")),
    })
}
