//! Driving ports for reading and mutating comments.
use std::collections::HashMap;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{ArticleId, Comment, CommentContent, CommentId, Error, PageRequest, UserId};

/// Read side of the comment use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Page through the comments of an article.
    async fn list_comments(
        &self,
        article_id: ArticleId,
        request: PageRequest,
    ) -> Result<Page<Comment>, Error>;

    /// Comment totals for a batch of articles; missing entries mean zero.
    async fn count_comments(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, Error>;
}

/// Write side of the comment use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Comment on an existing article.
    async fn create_comment(
        &self,
        actor: UserId,
        article_id: ArticleId,
        content: CommentContent,
    ) -> Result<Comment, Error>;

    /// Edit a comment owned by `actor`.
    async fn update_comment(
        &self,
        actor: UserId,
        id: CommentId,
        content: CommentContent,
    ) -> Result<Comment, Error>;

    /// Delete a comment owned by `actor`.
    async fn delete_comment(&self, actor: UserId, id: CommentId) -> Result<bool, Error>;
}
