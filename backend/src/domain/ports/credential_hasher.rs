//! Port for salted one-way hashing of passwords and refresh tokens.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum CredentialHashError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a secret into a self-describing PHC string.
    async fn hash(&self, secret: &str) -> Result<String, CredentialHashError>;

    /// Check a secret against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; an unparsable hash is an error.
    async fn verify(&self, secret: &str, hash: &str) -> Result<bool, CredentialHashError>;
}
