//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to fetch user-visible data without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users ordered by identifier.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Users for the given ids; unknown ids are skipped.
    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, Error>;
}
