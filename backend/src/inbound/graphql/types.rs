//! GraphQL output types wrapping domain entities.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Enum, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use pagination::{Direction, Page};

use crate::domain::{
    Article, ArticleId, AuthPayload, Comment, Error, Like, Timeline, User, UserId, encode_cursor,
};

use super::error::graphql_error;
use super::loaders::{ArticleLoader, CommentCountLoader, LikeCountLoader, UserLoader};

/// Sort order for comment listings.
#[derive(Enum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<SortOrder> for Direction {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::Ascending,
            SortOrder::Desc => Self::Descending,
        }
    }
}

pub struct UserNode(pub User);

#[Object(name = "User")]
impl UserNode {
    async fn id(&self) -> i32 {
        self.0.id.get()
    }

    async fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    async fn name(&self) -> Option<&str> {
        self.0.name.as_ref().map(AsRef::as_ref)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

pub struct ArticleNode(pub Article);

#[Object(name = "Article")]
impl ArticleNode {
    async fn id(&self) -> i32 {
        self.0.id.get()
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<UserNode> {
        load_user(ctx, self.0.author_id).await
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn comment_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let count = ctx
            .data::<DataLoader<CommentCountLoader>>()?
            .load_one(self.0.id)
            .await
            .map_err(graphql_error)?;
        Ok(saturate(count.unwrap_or_default()))
    }

    async fn like_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let count = ctx
            .data::<DataLoader<LikeCountLoader>>()?
            .load_one(self.0.id)
            .await
            .map_err(graphql_error)?;
        Ok(saturate(count.unwrap_or_default()))
    }
}

pub struct CommentNode(pub Comment);

#[Object(name = "Comment")]
impl CommentNode {
    async fn id(&self) -> i32 {
        self.0.id.get()
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<UserNode> {
        load_user(ctx, self.0.author_id).await
    }

    async fn article(&self, ctx: &Context<'_>) -> Result<ArticleNode> {
        load_article(ctx, self.0.article_id).await
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

pub struct LikeNode(pub Like);

#[Object(name = "Like")]
impl LikeNode {
    async fn id(&self) -> i32 {
        self.0.id.get()
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<UserNode> {
        load_user(ctx, self.0.user_id).await
    }

    async fn article(&self, ctx: &Context<'_>) -> Result<ArticleNode> {
        load_article(ctx, self.0.article_id).await
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }
}

/// Tokens issued by register, login and refresh.
#[derive(SimpleObject)]
#[graphql(name = "AuthPayload")]
pub struct AuthPayloadNode {
    /// Access token for the `Authorization` header.
    token: String,
    refresh_token: String,
    user: UserNode,
}

impl From<AuthPayload> for AuthPayloadNode {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.tokens.access_token,
            refresh_token: payload.tokens.refresh_token,
            user: UserNode(payload.user),
        }
    }
}

#[derive(SimpleObject)]
pub struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(SimpleObject)]
pub struct ArticleEdge {
    cursor: String,
    node: ArticleNode,
}

#[derive(SimpleObject)]
pub struct ArticleConnection {
    edges: Vec<ArticleEdge>,
    page_info: PageInfo,
}

impl ArticleConnection {
    pub(crate) fn from_page(page: Page<Article>) -> Result<Self, Error> {
        let (edges, page_info) = connection_parts(page)?;
        Ok(Self {
            edges: edges
                .into_iter()
                .map(|(cursor, article)| ArticleEdge {
                    cursor,
                    node: ArticleNode(article),
                })
                .collect(),
            page_info,
        })
    }
}

#[derive(SimpleObject)]
pub struct CommentEdge {
    cursor: String,
    node: CommentNode,
}

#[derive(SimpleObject)]
pub struct CommentConnection {
    edges: Vec<CommentEdge>,
    page_info: PageInfo,
}

impl CommentConnection {
    pub(crate) fn from_page(page: Page<Comment>) -> Result<Self, Error> {
        let (edges, page_info) = connection_parts(page)?;
        Ok(Self {
            edges: edges
                .into_iter()
                .map(|(cursor, comment)| CommentEdge {
                    cursor,
                    node: CommentNode(comment),
                })
                .collect(),
            page_info,
        })
    }
}

fn connection_parts<T: Timeline>(page: Page<T>) -> Result<(Vec<(String, T)>, PageInfo), Error> {
    let has_next_page = page.has_next_page();
    let edges = page
        .into_items()
        .into_iter()
        .map(|item| Ok((encode_cursor(item.timeline_key())?, item)))
        .collect::<Result<Vec<_>, Error>>()?;
    let end_cursor = edges.last().map(|(cursor, _)| cursor.clone());
    Ok((
        edges,
        PageInfo {
            has_next_page,
            end_cursor,
        },
    ))
}

async fn load_user(ctx: &Context<'_>, id: UserId) -> Result<UserNode> {
    ctx.data::<DataLoader<UserLoader>>()?
        .load_one(id)
        .await
        .map_err(graphql_error)?
        .map(UserNode)
        .ok_or_else(|| graphql_error(Error::not_found(format!("User {id} not found"))))
}

async fn load_article(ctx: &Context<'_>, id: ArticleId) -> Result<ArticleNode> {
    ctx.data::<DataLoader<ArticleLoader>>()?
        .load_one(id)
        .await
        .map_err(graphql_error)?
        .map(ArticleNode)
        .ok_or_else(|| graphql_error(Error::not_found("Article not found")))
}

fn saturate(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_cursor;
    use chrono::TimeZone;

    fn article(id: i32, minute: u32) -> Article {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, minute, 0)
            .single()
            .expect("timestamp");
        Article {
            id: ArticleId::from_row(id),
            title: format!("Article {id}"),
            content: "Body".into(),
            author_id: UserId::from_row(1),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn end_cursor_points_at_the_last_edge() {
        let rows = vec![article(3, 30), article(2, 20), article(1, 10)];
        let page = Page::from_overfetched(rows, pagination::PageSize::new(Some(2)).expect("size"));

        let connection = ArticleConnection::from_page(page).expect("connection");

        assert_eq!(connection.edges.len(), 2);
        assert!(connection.page_info.has_next_page);
        let end = connection.page_info.end_cursor.expect("end cursor");
        let key = decode_cursor(&end).expect("decodes");
        assert_eq!(key, article(2, 20).timeline_key());
        assert_eq!(connection.edges[1].cursor, end);
    }

    #[test]
    fn empty_pages_have_no_end_cursor() {
        let page = Page::from_overfetched(Vec::<Article>::new(), pagination::PageSize::default());

        let connection = ArticleConnection::from_page(page).expect("connection");

        assert!(connection.edges.is_empty());
        assert!(!connection.page_info.has_next_page);
        assert_eq!(connection.page_info.end_cursor, None);
    }

    #[test]
    fn sort_order_maps_to_direction() {
        assert_eq!(Direction::from(SortOrder::Asc), Direction::Ascending);
        assert_eq!(Direction::from(SortOrder::default()), Direction::Descending);
    }

    #[test]
    fn counts_saturate_at_the_graphql_int_range() {
        assert_eq!(saturate(7), 7);
        assert_eq!(saturate(i64::MAX), i32::MAX);
    }
}
