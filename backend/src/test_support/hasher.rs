//! Reversible credential hasher; keeps tests fast and hashes readable.

use async_trait::async_trait;

use crate::domain::ports::{CredentialHashError, CredentialHasher};

const PREFIX: &str = "plain:";

/// Stores secrets as `plain:<secret>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextHasher;

#[async_trait]
impl CredentialHasher for PlaintextHasher {
    async fn hash(&self, secret: &str) -> Result<String, CredentialHashError> {
        Ok(format!("{PREFIX}{secret}"))
    }

    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, CredentialHashError> {
        hash.strip_prefix(PREFIX)
            .map(|stored| stored == secret)
            .ok_or_else(|| CredentialHashError::hashing("unrecognised hash format"))
    }
}
