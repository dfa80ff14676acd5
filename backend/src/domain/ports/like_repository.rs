//! Port abstraction for like persistence.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ArticleId, Like, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by like repository adapters.
    pub enum LikePersistenceError for "like repository" {
        /// The (user, article) pair is already liked.
        AlreadyLiked => "article already liked by this user"
            => conflict("You have already liked this article"),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Record a like; the (user, article) pair must be new.
    async fn create(
        &self,
        user_id: UserId,
        article_id: ArticleId,
        now: DateTime<Utc>,
    ) -> Result<Like, LikePersistenceError>;

    /// Remove a like. Returns `false` when none existed.
    async fn delete(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError>;

    /// Whether the user likes the article.
    async fn exists(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError>;

    /// Like totals per article; articles without likes are omitted.
    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, LikePersistenceError>;
}
