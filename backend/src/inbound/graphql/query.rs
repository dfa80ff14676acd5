//! Query resolvers.

use async_graphql::{Context, Object, Result};
use pagination::Direction;

use crate::domain::{ArticleId, PageRequest, UserId};

use super::error::{graphql_error, invalid_id};
use super::schema::{services, viewer};
use super::types::{ArticleConnection, ArticleNode, CommentConnection, SortOrder, UserNode};

const GREETING: &str = "Hello, GraphQL!";

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Greeting, delayed outside production to exercise loading states.
    async fn hello(&self, ctx: &Context<'_>) -> Result<Option<&'static str>> {
        if let Some(delay) = services(ctx)?.response_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Some(GREETING))
    }

    /// All users ordered by id.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserNode>> {
        let users = services(ctx)?
            .users
            .list_users()
            .await
            .map_err(graphql_error)?;
        Ok(users.into_iter().map(UserNode).collect())
    }

    /// One article, or null when it does not exist.
    async fn article(&self, ctx: &Context<'_>, id: i32) -> Result<Option<ArticleNode>> {
        let id = ArticleId::new(id.into()).map_err(invalid_id)?;
        let article = services(ctx)?
            .articles_query
            .find_article(id)
            .await
            .map_err(graphql_error)?;
        Ok(article.map(ArticleNode))
    }

    /// Newest articles first.
    async fn articles(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<ArticleConnection> {
        let request = PageRequest::parse(first, after.as_deref(), Direction::Descending)
            .map_err(graphql_error)?;
        let page = services(ctx)?
            .articles_query
            .list_articles(None, request)
            .await
            .map_err(graphql_error)?;
        ArticleConnection::from_page(page).map_err(graphql_error)
    }

    /// Newest articles of one author first.
    async fn articles_by_author(
        &self,
        ctx: &Context<'_>,
        author_id: i32,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<ArticleConnection> {
        let author_id = UserId::new(author_id.into()).map_err(invalid_id)?;
        let request = PageRequest::parse(first, after.as_deref(), Direction::Descending)
            .map_err(graphql_error)?;
        let page = services(ctx)?
            .articles_query
            .list_articles(Some(author_id), request)
            .await
            .map_err(graphql_error)?;
        ArticleConnection::from_page(page).map_err(graphql_error)
    }

    /// Comments of an article, newest first unless `sort: ASC`.
    async fn comments_by_article(
        &self,
        ctx: &Context<'_>,
        article_id: i32,
        first: Option<i32>,
        after: Option<String>,
        sort: Option<SortOrder>,
    ) -> Result<CommentConnection> {
        let article_id = ArticleId::new(article_id.into()).map_err(invalid_id)?;
        let direction = sort.unwrap_or_default().into();
        let request =
            PageRequest::parse(first, after.as_deref(), direction).map_err(graphql_error)?;
        let page = services(ctx)?
            .comments_query
            .list_comments(article_id, request)
            .await
            .map_err(graphql_error)?;
        CommentConnection::from_page(page).map_err(graphql_error)
    }

    /// Whether the viewer likes an article; always false for anonymous viewers.
    async fn has_liked_article(&self, ctx: &Context<'_>, article_id: i32) -> Result<bool> {
        let article_id = ArticleId::new(article_id.into()).map_err(invalid_id)?;
        let Some(user_id) = viewer(ctx).user_id() else {
            return Ok(false);
        };
        services(ctx)?
            .likes_query
            .has_liked(user_id, article_id)
            .await
            .map_err(graphql_error)
    }
}
