//! Driving ports for likes.
use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{ArticleId, Error, Like, UserId};

/// Read side of the like use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesQuery: Send + Sync {
    /// Whether `user_id` likes the article.
    async fn has_liked(&self, user_id: UserId, article_id: ArticleId) -> Result<bool, Error>;

    /// Like totals for a batch of articles; missing entries mean zero.
    async fn count_likes(&self, ids: &[ArticleId]) -> Result<HashMap<ArticleId, i64>, Error>;
}

/// Write side of the like use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikesCommand: Send + Sync {
    /// Like an article; a second like is a conflict.
    async fn like_article(&self, actor: UserId, article_id: ArticleId) -> Result<Like, Error>;

    /// Withdraw a like; withdrawing a missing like is `NotFound`.
    async fn unlike_article(&self, actor: UserId, article_id: ArticleId) -> Result<bool, Error>;
}
