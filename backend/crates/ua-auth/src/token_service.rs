//! Signed access/refresh token issuance and verification (HS256).
//!
//! Expiry is checked against the injected clock, not the system time: a
//! token whose `exp` is at or before `now` is expired. Timestamps are whole
//! Unix seconds.

use crate::{
    AccessClaims, AuthError, Clock, RefreshClaims, Result as AuthErrorResult, TokenConfig,
    TokenPair,
};

use ua_core::{ErrorLocation, User};

use std::panic::Location;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub struct TokenService {
    clock: Clock,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(clock: Clock, config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false; // checked against the injected clock
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);

        Self {
            clock,
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn clock(&self) -> Clock {
        self.clock.clone()
    }

    /// Returns the signed token and its expiry (Unix seconds)
    #[track_caller]
    pub fn create_access_token(&self, user: &User) -> AuthErrorResult<(String, i64)> {
        self.sign_access(user, self.now().timestamp())
    }

    #[track_caller]
    pub fn create_refresh_token(&self, user: &User) -> AuthErrorResult<String> {
        self.sign_refresh(user, self.now().timestamp())
    }

    #[track_caller]
    pub fn parse_access_token(&self, token: &str) -> AuthErrorResult<AccessClaims> {
        let claims: AccessClaims = self.verify(token, &self.access_decoding)?;
        self.ensure_unexpired(claims.exp)?;
        Ok(claims)
    }

    #[track_caller]
    pub fn parse_refresh_token(&self, token: &str) -> AuthErrorResult<RefreshClaims> {
        let claims: RefreshClaims = self.verify(token, &self.refresh_decoding)?;
        self.ensure_unexpired(claims.exp)?;
        Ok(claims)
    }

    /// Issue an access and a refresh token sharing one issuance instant
    #[track_caller]
    pub fn issue_pair(&self, user: &User) -> AuthErrorResult<TokenPair> {
        let now = self.now().timestamp();
        let (access_token, expires_at) = self.sign_access(user, now)?;
        let refresh_token = self.sign_refresh(user, now)?;

        log::info!("Issued token pair for user {} (expires at {})", user.id, expires_at);

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    #[track_caller]
    fn sign_access(&self, user: &User, now: i64) -> AuthErrorResult<(String, i64)> {
        let exp = now.saturating_add(self.access_ttl_secs);
        let claims = AccessClaims {
            sub: user.id,
            name: user.full_name.clone(),
            iat: now,
            exp,
        };

        Ok((sign(&claims, &self.access_encoding)?, exp))
    }

    #[track_caller]
    fn sign_refresh(&self, user: &User, now: i64) -> AuthErrorResult<String> {
        let claims = RefreshClaims {
            sub: user.id,
            iat: now,
            exp: now.saturating_add(self.refresh_ttl_secs),
        };

        sign(&claims, &self.refresh_encoding)
    }

    #[track_caller]
    fn verify<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> AuthErrorResult<T> {
        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::token_invalid(e.to_string()))
    }

    #[track_caller]
    fn ensure_unexpired(&self, exp: i64) -> AuthErrorResult<()> {
        if self.now().timestamp() >= exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[track_caller]
fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> AuthErrorResult<String> {
    encode(&Header::new(Algorithm::HS256), claims, key).map_err(|e| AuthError::TokenSigning {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })
}
