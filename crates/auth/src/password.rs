//! Password hashing using Argon2id

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id password hasher.
///
/// Hashing and verification run on the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// 19 MiB
    const MEMORY_COST: u32 = 19_456;
    const TIME_COST: u32 = 2;
    const PARALLELISM: u32 = 1;
    const OUTPUT_LEN: usize = 32;

    pub fn new() -> Self {
        Self::with_params(Self::MEMORY_COST, Self::TIME_COST, Self::PARALLELISM)
            .unwrap_or_else(|_| Self {
                params: Params::default(),
            })
    }

    /// Custom cost parameters (cheap settings for tests)
    pub fn with_params(
        memory_cost: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, AuthError> {
        let params = Params::new(memory_cost, time_cost, parallelism, Some(Self::OUTPUT_LEN))
            .map_err(|e| {
                tracing::error!(error = %e, "Invalid Argon2 parameters");
                AuthError::PasswordHashFailed
            })?;

        Ok(Self { params })
    }

    /// Hash a password into PHC string format
    pub async fn hash(&self, password: String) -> Result<String, AuthError> {
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hash task panicked");
            AuthError::PasswordHashFailed
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AuthError::PasswordHashFailed
        })
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`. A malformed stored hash is an error.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash).map_err(|e| {
                tracing::error!(error = %e, "Failed to parse stored password hash");
                AuthError::PasswordHashFailed
            })?;

            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verify task panicked");
            AuthError::PasswordHashFailed
        })?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
