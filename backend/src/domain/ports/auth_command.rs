//! Driving port for account and session use-cases.
//!
//! GraphQL resolvers call this port for registration, login, token refresh,
//! and logout without knowing how credentials are hashed or stored.

use async_trait::async_trait;

use crate::domain::{AuthPayload, Error, LoginCredentials, Registration, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<AuthPayload, Error>;

    /// Sign in with email and password.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthPayload, Error>;

    /// Exchange a refresh token for a new token pair, revoking the old one.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthPayload, Error>;

    /// Revoke a refresh token. Returns `true` when a stored token was removed.
    async fn logout(&self, refresh_token: &str) -> Result<bool, Error>;
}

/// Resolves a bearer access token to the user it was issued for.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenVerifier: Send + Sync {
    /// Verify an access token.
    ///
    /// Errors are `Unauthorized` with a message suitable for the client.
    fn verify_access_token(&self, token: &str) -> Result<UserId, Error>;
}
