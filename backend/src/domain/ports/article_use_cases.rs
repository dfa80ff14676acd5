//! Driving ports for reading and mutating articles.
use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Article, ArticleChanges, ArticleDraft, ArticleId, Error, PageRequest, UserId};

/// Read side of the article use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Fetch one article; `None` when it does not exist.
    async fn find_article(&self, id: ArticleId) -> Result<Option<Article>, Error>;

    /// Fetch several articles for batched relation lookups.
    async fn find_articles(&self, ids: &[ArticleId]) -> Result<Vec<Article>, Error>;

    /// Newest-first page of articles, optionally restricted to one author.
    async fn list_articles(
        &self,
        author_id: Option<UserId>,
        request: PageRequest,
    ) -> Result<Page<Article>, Error>;
}

/// Write side of the article use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Publish an article authored by `actor`.
    async fn create_article(&self, actor: UserId, draft: ArticleDraft) -> Result<Article, Error>;

    /// Edit an article owned by `actor`.
    async fn update_article(
        &self,
        actor: UserId,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> Result<Article, Error>;

    /// Delete an article owned by `actor` along with its comments and likes.
    async fn delete_article(&self, actor: UserId, id: ArticleId) -> Result<bool, Error>;
}
