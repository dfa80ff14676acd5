//! Port for persisted (hashed) refresh tokens.
//!
//! Tokens are never stored in clear text. Services find a presented token by
//! scanning the owner's rows and verifying each hash.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by refresh token adapters.
    pub enum RefreshTokenPersistenceError for "refresh token repository" {}
}

/// Stored refresh token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRefreshToken {
    /// Row identifier.
    pub id: i32,
    /// Owner.
    pub user_id: UserId,
    /// Argon2 PHC string of the token.
    pub token_hash: String,
    /// Expiry copied from the token's claims.
    pub expires_at: DateTime<Utc>,
}

/// Refresh token row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    /// Owner.
    pub user_id: UserId,
    /// Argon2 PHC string of the token.
    pub token_hash: String,
    /// Issue instant.
    pub created_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a newly issued token.
    async fn store(&self, token: &NewRefreshToken) -> Result<(), RefreshTokenPersistenceError>;

    /// All stored tokens of a user, oldest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<StoredRefreshToken>, RefreshTokenPersistenceError>;

    /// Delete one stored token. Returns `false` when it was already gone.
    async fn delete(&self, id: i32) -> Result<bool, RefreshTokenPersistenceError>;

    /// Atomically replace `old_id` with `replacement`.
    ///
    /// Returns `false`, storing nothing, when `old_id` no longer exists, which
    /// happens when two clients race to rotate the same token.
    async fn rotate(
        &self,
        old_id: i32,
        replacement: &NewRefreshToken,
    ) -> Result<bool, RefreshTokenPersistenceError>;

    /// Remove the user's tokens that expired before `now`.
    async fn purge_expired(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, RefreshTokenPersistenceError>;
}
