//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, User, UserId, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError for "user repository" {
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email already registered: {email}"
            => conflict("Email is already registered"),
    }
}

/// Account to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalised email.
    pub email: Email,
    /// Display name.
    pub name: Option<UserName>,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Creation instant, also used as the initial update instant.
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password hash, for login only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Public user record.
    pub user: User,
    /// Argon2 PHC string.
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch several users at once; missing ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch login material for an email.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// All users ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
