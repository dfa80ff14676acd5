//! Port abstraction for article persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Article, ArticleChanges, ArticleDraft, ArticleId, TimelineKey, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by article repository adapters.
    pub enum ArticlePersistenceError for "article repository" {}
}

/// Newest-first keyset query over articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleListQuery {
    /// Restrict to one author.
    pub author_id: Option<UserId>,
    /// Exclusive starting key.
    pub after: Option<TimelineKey>,
    /// Maximum rows to return.
    pub limit: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert an article.
    async fn create(
        &self,
        author_id: UserId,
        draft: &ArticleDraft,
        now: DateTime<Utc>,
    ) -> Result<Article, ArticlePersistenceError>;

    /// Fetch an article.
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Fetch several articles at once; missing ids are skipped.
    async fn find_by_ids(&self, ids: &[ArticleId])
    -> Result<Vec<Article>, ArticlePersistenceError>;

    /// List articles ordered by `(created_at, id)` descending.
    async fn list(&self, query: ArticleListQuery) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Apply changes. Returns `None` when the article does not exist.
    async fn update(
        &self,
        id: ArticleId,
        changes: &ArticleChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Article>, ArticlePersistenceError>;

    /// Delete an article together with its comments and likes.
    async fn delete(&self, id: ArticleId) -> Result<bool, ArticlePersistenceError>;
}
