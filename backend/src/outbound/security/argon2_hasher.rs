//! Argon2id implementation of the `CredentialHasher` port.
//!
//! Hashing is CPU bound and runs on the blocking thread pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use async_trait::async_trait;

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Salted Argon2id hasher producing PHC strings.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Hasher {
    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn hash_blocking(&self, secret: &str) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }

    fn verify_blocking(&self, secret: &str, hash: &str) -> Result<bool, CredentialHashError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| CredentialHashError::hashing(err.to_string()))?;
        // Parameters embedded in the PHC string take precedence over `self.params`.
        match self.argon2().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::hashing(err.to_string())),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, CredentialHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CredentialHashError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CredentialHashError::hashing(err.to_string()))?
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, secret: &str) -> Result<String, CredentialHashError> {
        let hasher = self.clone();
        let secret = zeroize::Zeroizing::new(secret.to_owned());
        run_blocking(move || hasher.hash_blocking(&secret)).await
    }

    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, CredentialHashError> {
        let hasher = self.clone();
        let secret = zeroize::Zeroizing::new(secret.to_owned());
        let hash = hash.to_owned();
        run_blocking(move || hasher.verify_blocking(&secret, &hash)).await
    }
}
