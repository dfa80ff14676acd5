//! Port abstraction for applying example data seeds.
//!
//! The request carries generated content whose relations are expressed as
//! indexes into the request's own user and article lists. Adapters resolve
//! them to database identifiers while inserting, record the seed run, and do
//! all of it atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by example data seed repository adapters.
    pub enum ExampleDataSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "example data seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "example data seeding query failed: {message}",
    }
}

/// Result of attempting to apply a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Seed was newly recorded and its content inserted.
    Applied,
    /// Seed was already recorded; nothing was inserted.
    AlreadySeeded,
}

/// Seed account.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedUser {
    /// Unique email.
    pub email: Email,
    /// Display name.
    pub name: UserName,
    /// Argon2 PHC string of the demo password.
    pub password_hash: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Seed article; `author` indexes [`ExampleDataSeedRequest::users`].
#[derive(Debug, Clone)]
pub struct ExampleDataSeedArticle {
    /// Index of the author.
    pub author: usize,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Seed comment referencing a user and an article by index.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedComment {
    /// Index of the author.
    pub author: usize,
    /// Index of the article.
    pub article: usize,
    /// Body.
    pub content: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Seed like referencing a user and an article by index.
#[derive(Debug, Clone, Copy)]
pub struct ExampleDataSeedLike {
    /// Index of the liking user.
    pub user: usize,
    /// Index of the article.
    pub article: usize,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Request payload for applying a seed run.
#[derive(Debug, Clone)]
pub struct ExampleDataSeedRequest {
    /// Seed name recorded in the seed run table.
    pub seed_key: String,
    /// RNG seed value used for deterministic generation.
    pub seed: i64,
    /// Accounts to insert.
    pub users: Vec<ExampleDataSeedUser>,
    /// Articles to insert.
    pub articles: Vec<ExampleDataSeedArticle>,
    /// Comments to insert.
    pub comments: Vec<ExampleDataSeedComment>,
    /// Likes to insert.
    pub likes: Vec<ExampleDataSeedLike>,
}

/// Convert a registry seed into the signed column type.
///
/// # Examples
/// ```
/// use scribe::domain::ports::try_seed_to_i64;
///
/// assert_eq!(try_seed_to_i64(2026), Some(2026));
/// assert_eq!(try_seed_to_i64(u64::MAX), None);
/// ```
#[must_use]
pub fn try_seed_to_i64(seed: u64) -> Option<i64> {
    i64::try_from(seed).ok()
}

/// Port for applying example data seeds in a single transaction.
///
/// Implementations must:
/// - Insert a seed run record guarded by `ON CONFLICT DO NOTHING`.
/// - Insert users, then articles, comments, and likes.
/// - Roll back all changes if any step fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleDataSeedRepository: Send + Sync {
    /// Apply a seed run.
    ///
    /// Returns `Applied` when the seed run is recorded and data is inserted,
    /// or `AlreadySeeded` when the seed key already exists.
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError>;
}
