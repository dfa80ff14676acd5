//! Port abstraction for comment persistence.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Direction;

use crate::domain::{ArticleId, Comment, CommentContent, CommentId, TimelineKey, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError for "comment repository" {}
}

/// Keyset query over one article's comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentListQuery {
    /// Commented article.
    pub article_id: ArticleId,
    /// Exclusive starting key.
    pub after: Option<TimelineKey>,
    /// Order of `(created_at, id)`.
    pub direction: Direction,
    /// Maximum rows to return.
    pub limit: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment.
    async fn create(
        &self,
        author_id: UserId,
        article_id: ArticleId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Comment, CommentPersistenceError>;

    /// Fetch a comment.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError>;

    /// List comments of an article.
    async fn list(&self, query: CommentListQuery) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Replace the content. Returns `None` when the comment does not exist.
    async fn update(
        &self,
        id: CommentId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentPersistenceError>;

    /// Delete a comment.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError>;

    /// Comment totals per article; articles without comments are omitted.
    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, CommentPersistenceError>;
}
