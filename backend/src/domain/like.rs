//! Likes: one per user and article.

use chrono::{DateTime, Utc};

use crate::domain::{ArticleId, LikeId, UserId};

/// A user's like of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    /// Identifier.
    pub id: LikeId,
    /// Liking user.
    pub user_id: UserId,
    /// Liked article.
    pub article_id: ArticleId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}
