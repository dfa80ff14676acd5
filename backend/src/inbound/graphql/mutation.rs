//! Mutation resolvers.
//!
//! Content mutations require an authenticated viewer; ownership is checked by
//! the services.

use async_graphql::{Context, Object, Result};

use crate::domain::{
    ArticleDraft, ArticleId, ArticleUpdate, CommentDraft, CommentEdit, CommentId,
    LoginCredentials, Registration, UserId,
};

use super::error::{graphql_error, invalid_id};
use super::schema::{services, viewer};
use super::types::{ArticleNode, AuthPayloadNode, CommentNode, LikeNode};

pub struct MutationRoot;

fn actor(ctx: &Context<'_>) -> Result<UserId> {
    viewer(ctx).require_user().map_err(graphql_error)
}

#[Object]
impl MutationRoot {
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<AuthPayloadNode> {
        let registration = Registration::parse(&email, &password, &name).map_err(graphql_error)?;
        let payload = services(ctx)?
            .auth
            .register(registration)
            .await
            .map_err(graphql_error)?;
        Ok(payload.into())
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayloadNode> {
        let credentials = LoginCredentials::parse(&email, &password).map_err(graphql_error)?;
        let payload = services(ctx)?
            .auth
            .login(credentials)
            .await
            .map_err(graphql_error)?;
        Ok(payload.into())
    }

    /// Revoke a refresh token. True when a stored token was removed.
    async fn logout(&self, ctx: &Context<'_>, refresh_token: String) -> Result<bool> {
        services(ctx)?
            .auth
            .logout(&refresh_token)
            .await
            .map_err(graphql_error)
    }

    /// Exchange a refresh token for a rotated token pair.
    async fn refresh_token(&self, ctx: &Context<'_>, token: String) -> Result<AuthPayloadNode> {
        let payload = services(ctx)?
            .auth
            .refresh(&token)
            .await
            .map_err(graphql_error)?;
        Ok(payload.into())
    }

    async fn create_article(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
    ) -> Result<ArticleNode> {
        let actor = actor(ctx)?;
        let draft = ArticleDraft::parse(&title, &content).map_err(graphql_error)?;
        let article = services(ctx)?
            .articles
            .create_article(actor, draft)
            .await
            .map_err(graphql_error)?;
        Ok(ArticleNode(article))
    }

    async fn update_article(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<ArticleNode> {
        let actor = actor(ctx)?;
        let update = ArticleUpdate::parse(id.into(), title.as_deref(), content.as_deref())
            .map_err(graphql_error)?;
        let article = services(ctx)?
            .articles
            .update_article(actor, update.id, update.changes)
            .await
            .map_err(graphql_error)?;
        Ok(ArticleNode(article))
    }

    async fn delete_article(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let actor = actor(ctx)?;
        let id = ArticleId::new(id.into()).map_err(invalid_id)?;
        services(ctx)?
            .articles
            .delete_article(actor, id)
            .await
            .map_err(graphql_error)
    }

    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        content: String,
        article_id: i32,
    ) -> Result<CommentNode> {
        let actor = actor(ctx)?;
        let draft = CommentDraft::parse(&content, article_id.into()).map_err(graphql_error)?;
        let comment = services(ctx)?
            .comments
            .create_comment(actor, draft.article_id, draft.content)
            .await
            .map_err(graphql_error)?;
        Ok(CommentNode(comment))
    }

    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: i32,
        content: String,
    ) -> Result<CommentNode> {
        let actor = actor(ctx)?;
        let edit = CommentEdit::parse(id.into(), &content).map_err(graphql_error)?;
        let comment = services(ctx)?
            .comments
            .update_comment(actor, edit.id, edit.content)
            .await
            .map_err(graphql_error)?;
        Ok(CommentNode(comment))
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let actor = actor(ctx)?;
        let id = CommentId::new(id.into()).map_err(invalid_id)?;
        services(ctx)?
            .comments
            .delete_comment(actor, id)
            .await
            .map_err(graphql_error)
    }

    /// Like an article; a second like by the same user is a conflict.
    async fn like_article(&self, ctx: &Context<'_>, article_id: i32) -> Result<LikeNode> {
        let actor = actor(ctx)?;
        let article_id = ArticleId::new(article_id.into()).map_err(invalid_id)?;
        let like = services(ctx)?
            .likes
            .like_article(actor, article_id)
            .await
            .map_err(graphql_error)?;
        Ok(LikeNode(like))
    }

    async fn unlike_article(&self, ctx: &Context<'_>, article_id: i32) -> Result<bool> {
        let actor = actor(ctx)?;
        let article_id = ArticleId::new(article_id.into()).map_err(invalid_id)?;
        services(ctx)?
            .likes
            .unlike_article(actor, article_id)
            .await
            .map_err(graphql_error)
    }
}
