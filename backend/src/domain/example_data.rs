//! Example data seeding orchestration.
//!
//! Converts deterministic example-data registry outputs into seed records,
//! then delegates persistence to the seeding repository port.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use example_data::{
    ExampleArticleSeed, ExampleCommentSeed, ExampleDataset, ExampleLikeSeed, ExampleUserSeed,
    GenerationError, RegistryError, SeedRegistry, generate_dataset,
};
use mockable::Clock;
use thiserror::Error;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, ExampleDataSeedArticle, ExampleDataSeedComment,
    ExampleDataSeedLike, ExampleDataSeedRepository, ExampleDataSeedRepositoryError,
    ExampleDataSeedRequest, ExampleDataSeedUser, SeedingResult, try_seed_to_i64,
};
use crate::domain::{Email, UserName, UserValidationError};

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

/// Age of seeded accounts; older than any generated article.
const SEEDED_ACCOUNT_AGE_DAYS: i64 = 120;

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed key used to record the run.
    pub seed_key: String,
    /// Number of users generated.
    pub user_count: usize,
    /// Number of articles generated.
    pub article_count: usize,
    /// Number of comments generated.
    pub comment_count: usize,
    /// Number of likes generated.
    pub like_count: usize,
    /// Persistence outcome for the seed run.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Dataset generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated user failed backend validation.
    #[error("generated user '{email}' failed validation: {source}")]
    InvalidUser {
        /// Generated email.
        email: String,
        /// Validation failure.
        source: UserValidationError,
    },
    /// Seed value cannot be represented in the database.
    #[error("seed value {seed} exceeds maximum representable value")]
    SeedOverflow {
        /// Rejected seed.
        seed: u64,
    },
    /// The demo password could not be hashed.
    #[error("demo password hashing failed: {0}")]
    Hashing(#[from] CredentialHashError),
    /// Persistence adapter failed while seeding.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] ExampleDataSeedRepositoryError),
}

/// Service that orchestrates example data seeding.
#[derive(Clone)]
pub struct ExampleDataSeeder<R> {
    repository: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
}

impl<R> ExampleDataSeeder<R> {
    /// Create a new seeder with the given adapters.
    pub fn new(
        repository: Arc<R>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }
}

impl<R> ExampleDataSeeder<R>
where
    R: ExampleDataSeedRepository,
{
    /// Apply example data for a named seed within the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] if registry lookup, generation,
    /// validation, hashing, or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        user_count_override: Option<usize>,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let mut seed_def = registry.find_seed(seed_name)?.clone();
        if let Some(count) = user_count_override {
            seed_def = seed_def.with_user_count(count);
        }
        let seed = try_seed_to_i64(seed_def.seed()).ok_or(ExampleDataSeedingError::SeedOverflow {
            seed: seed_def.seed(),
        })?;

        let dataset = generate_dataset(&seed_def)?;
        let password_hash = self.hasher.hash(DEMO_PASSWORD).await?;
        let request = build_request(
            seed_def.name().to_owned(),
            seed,
            dataset,
            &password_hash,
            self.clock.utc(),
        )?;

        let outcome = ExampleDataSeedOutcome {
            seed_key: request.seed_key.clone(),
            user_count: request.users.len(),
            article_count: request.articles.len(),
            comment_count: request.comments.len(),
            like_count: request.likes.len(),
            result: SeedingResult::AlreadySeeded,
        };
        let result = self.repository.seed_example_data(request).await?;
        Ok(ExampleDataSeedOutcome { result, ..outcome })
    }
}

fn build_request(
    seed_key: String,
    seed: i64,
    dataset: ExampleDataset,
    password_hash: &str,
    now: DateTime<Utc>,
) -> Result<ExampleDataSeedRequest, ExampleDataSeedingError> {
    let account_created_at = now - Duration::days(SEEDED_ACCOUNT_AGE_DAYS);
    let users = dataset
        .users
        .into_iter()
        .map(|user| convert_user(user, password_hash, account_created_at))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExampleDataSeedRequest {
        seed_key,
        seed,
        users,
        articles: dataset
            .articles
            .into_iter()
            .map(|article| convert_article(article, now))
            .collect(),
        comments: dataset
            .comments
            .into_iter()
            .map(|comment| convert_comment(comment, now))
            .collect(),
        likes: dataset
            .likes
            .into_iter()
            .map(|like| convert_like(like, now))
            .collect(),
    })
}

fn convert_user(
    seed_user: ExampleUserSeed,
    password_hash: &str,
    created_at: DateTime<Utc>,
) -> Result<ExampleDataSeedUser, ExampleDataSeedingError> {
    let invalid = |source| ExampleDataSeedingError::InvalidUser {
        email: seed_user.email.clone(),
        source,
    };
    let email = Email::new(&seed_user.email).map_err(invalid)?;
    let name = UserName::new(&seed_user.name).map_err(invalid)?;
    Ok(ExampleDataSeedUser {
        email,
        name,
        password_hash: password_hash.to_owned(),
        created_at,
    })
}

fn minutes_before(now: DateTime<Utc>, minutes_ago: u32) -> DateTime<Utc> {
    now - Duration::minutes(i64::from(minutes_ago))
}

fn convert_article(seed: ExampleArticleSeed, now: DateTime<Utc>) -> ExampleDataSeedArticle {
    ExampleDataSeedArticle {
        author: seed.author_index,
        title: seed.title,
        content: seed.content,
        created_at: minutes_before(now, seed.minutes_ago),
    }
}

fn convert_comment(seed: ExampleCommentSeed, now: DateTime<Utc>) -> ExampleDataSeedComment {
    ExampleDataSeedComment {
        author: seed.author_index,
        article: seed.article_index,
        content: seed.content,
        created_at: minutes_before(now, seed.minutes_ago),
    }
}

fn convert_like(seed: ExampleLikeSeed, now: DateTime<Utc>) -> ExampleDataSeedLike {
    ExampleDataSeedLike {
        user: seed.user_index,
        article: seed.article_index,
        created_at: now,
    }
}
