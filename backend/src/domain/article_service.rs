//! Article use-cases.
//!
//! Reads are public. Writes require the caller to own the article; deleting
//! also removes its comments and likes through cascading foreign keys.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::info;

use crate::domain::ports::{
    ArticleListQuery, ArticleRepository, ArticlesCommand, ArticlesQuery, CommentRepository,
};
use crate::domain::{Article, ArticleChanges, ArticleDraft, ArticleId, Error, PageRequest, UserId};

/// Article service implementing the article driving ports.
#[derive(Clone)]
pub struct ArticleService<A, C> {
    articles: Arc<A>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<A, C> ArticleService<A, C> {
    /// Create a new service with the given repositories.
    pub fn new(articles: Arc<A>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            articles,
            comments,
            clock,
        }
    }
}



pub(crate) fn article_not_found() -> Error {
    Error::not_found("Article not found")
}

impl<A, C> ArticleService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn owned_article(
        &self,
        actor: UserId,
        id: ArticleId,
        verb: &str,
    ) -> Result<Article, Error> {
        let article = self
            .articles
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(article_not_found)?;
        if article.author_id != actor {
            return Err(Error::forbidden(format!("You can only {verb} your own articles")));
        }
        Ok(article)
    }
}

#[async_trait]
impl<A, C> ArticlesQuery for ArticleService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn find_article(&self, id: ArticleId) -> Result<Option<Article>, Error> {
        self.articles.find_by_id(id).await.map_err(Error::from)
    }

    async fn find_articles(&self, ids: &[ArticleId]) -> Result<Vec<Article>, Error> {
        self.articles.find_by_ids(ids).await.map_err(Error::from)
    }

    async fn list_articles(
        &self,
        author_id: Option<UserId>,
        request: PageRequest,
    ) -> Result<Page<Article>, Error> {
        let rows = self
            .articles
            .list(ArticleListQuery {
                author_id,
                after: request.after,
                limit: request.fetch_limit(),
            })
            .await
            .map_err(Error::from)?;
        Ok(Page::from_overfetched(rows, request.size))
    }
}

#[async_trait]
impl<A, C> ArticlesCommand for ArticleService<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn create_article(&self, actor: UserId, draft: ArticleDraft) -> Result<Article, Error> {
        let article = self
            .articles
            .create(actor, &draft, self.clock.utc())
            .await
            .map_err(Error::from)?;
        info!(article_id = %article.id, author_id = %actor, "article created");
        Ok(article)
    }

    async fn update_article(
        &self,
        actor: UserId,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> Result<Article, Error> {
        self.owned_article(actor, id, "update").await?;
        self.articles
            .update(id, &changes, self.clock.utc())
            .await
            .map_err(Error::from)?
            .ok_or_else(article_not_found)
    }

    async fn delete_article(&self, actor: UserId, id: ArticleId) -> Result<bool, Error> {
        self.owned_article(actor, id, "delete").await?;
        let comment_count = self
            .comments
            .count_by_articles(&[id])
            .await
            .map_err(Error::from)?
            .get(&id)
            .copied()
            .unwrap_or_default();

        if !self.articles.delete(id).await.map_err(Error::from)? {
            return Err(article_not_found());
        }
        info!(
            article_id = %id,
            author_id = %actor,
            comment_count,
            "article deleted with its comments"
        );
        Ok(true)
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;
