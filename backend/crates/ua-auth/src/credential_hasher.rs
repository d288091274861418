use crate::{AuthError, Result as AuthErrorResult};

/// bcrypt only reads the first 72 bytes; longer inputs are rejected
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// One-way password hashing. The salt is generated per call and embedded
/// in the digest.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::hashing(format!(
                "password exceeds {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::hashing(e.to_string()))
    }

    /// `Ok(false)` on mismatch; `Err` only when `digest` is not a valid
    /// bcrypt hash.
    #[track_caller]
    pub fn verify(&self, digest: &str, plaintext: &str) -> AuthErrorResult<bool> {
        let matched =
            bcrypt::verify(plaintext, digest).map_err(|e| AuthError::hashing(e.to_string()))?;

        // A digest never matches an over-long input: hashing refuses those.
        Ok(matched && plaintext.len() <= MAX_PASSWORD_BYTES)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl CredentialHasher {
    /// `hash` on the blocking pool; bcrypt is deliberately slow.
    pub async fn hash_blocking(&self, plaintext: String) -> AuthErrorResult<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::hashing(e.to_string()))?
    }

    pub async fn verify_blocking(&self, digest: String, plaintext: String) -> AuthErrorResult<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&digest, &plaintext))
            .await
            .map_err(|e| AuthError::hashing(e.to_string()))?
    }
}
