//! Comment use-cases.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::info;

use crate::domain::article_service::article_not_found;
use crate::domain::ports::{
    ArticleRepository, CommentListQuery, CommentRepository, CommentsCommand, CommentsQuery,
};
use crate::domain::{ArticleId, Comment, CommentContent, CommentId, Error, PageRequest, UserId};

/// Comment service implementing the comment driving ports.
#[derive(Clone)]
pub struct CommentService<C, A> {
    comments: Arc<C>,
    articles: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<C, A> CommentService<C, A> {
    /// Create a new service with the given repositories.
    pub fn new(comments: Arc<C>, articles: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            articles,
            clock,
        }
    }
}

fn comment_not_found() -> Error {
    Error::not_found("Comment not found")
}

impl<C, A> CommentService<C, A>
where
    C: CommentRepository,
    A: ArticleRepository,
{
    async fn ensure_article(&self, id: ArticleId) -> Result<(), Error> {
        self.articles
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .map(|_| ())
            .ok_or_else(article_not_found)
    }

    async fn owned_comment(
        &self,
        actor: UserId,
        id: CommentId,
        verb: &str,
    ) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(comment_not_found)?;
        if comment.author_id != actor {
            return Err(Error::forbidden(format!("You can only {verb} your own comments")));
        }
        Ok(comment)
    }
}

#[async_trait]
impl<C, A> CommentsQuery for CommentService<C, A>
where
    C: CommentRepository,
    A: ArticleRepository,
{
    async fn list_comments(
        &self,
        article_id: ArticleId,
        request: PageRequest,
    ) -> Result<Page<Comment>, Error> {
        let rows = self
            .comments
            .list(CommentListQuery {
                article_id,
                after: request.after,
                direction: request.direction,
                limit: request.fetch_limit(),
            })
            .await
            .map_err(Error::from)?;
        Ok(Page::from_overfetched(rows, request.size))
    }

    async fn count_comments(&self, ids: &[ArticleId]) -> Result<HashMap<ArticleId, i64>, Error> {
        self.comments
            .count_by_articles(ids)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<C, A> CommentsCommand for CommentService<C, A>
where
    C: CommentRepository,
    A: ArticleRepository,
{
    async fn create_comment(
        &self,
        actor: UserId,
        article_id: ArticleId,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        self.ensure_article(article_id).await?;
        let comment = self
            .comments
            .create(actor, article_id, &content, self.clock.utc())
            .await
            .map_err(Error::from)?;
        info!(comment_id = %comment.id, %article_id, author_id = %actor, "comment created");
        Ok(comment)
    }

    async fn update_comment(
        &self,
        actor: UserId,
        id: CommentId,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        self.owned_comment(actor, id, "update").await?;
        self.comments
            .update(id, &content, self.clock.utc())
            .await
            .map_err(Error::from)?
            .ok_or_else(comment_not_found)
    }

    async fn delete_comment(&self, actor: UserId, id: CommentId) -> Result<bool, Error> {
        self.owned_comment(actor, id, "delete").await?;
        if !self.comments.delete(id).await.map_err(Error::from)? {
            return Err(comment_not_found());
        }
        info!(comment_id = %id, author_id = %actor, "comment deleted");
        Ok(true)
    }
}
