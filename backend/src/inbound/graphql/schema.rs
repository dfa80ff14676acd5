//! Schema assembly and per-request context access.

use std::sync::Arc;
use std::time::Duration;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::domain::Viewer;
use crate::domain::ports::{
    ArticlesCommand, ArticlesQuery, AuthCommand, CommentsCommand, CommentsQuery, LikesCommand,
    LikesQuery, UsersQuery,
};

use super::loaders::{ArticleLoader, CommentCountLoader, LikeCountLoader, UserLoader, batching};
use super::mutation::MutationRoot;
use super::query::QueryRoot;

/// Executable schema served at `/graphql`.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Driving ports used by resolvers.
#[derive(Clone)]
pub struct GraphqlServices {
    pub auth: Arc<dyn AuthCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub articles: Arc<dyn ArticlesCommand>,
    pub articles_query: Arc<dyn ArticlesQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub likes: Arc<dyn LikesCommand>,
    pub likes_query: Arc<dyn LikesQuery>,
    /// Delay before answering `hello`; `None` disables it.
    pub response_delay: Option<Duration>,
}

/// Build the schema with loaders registered as shared data.
///
/// The viewer is attached per request with [`async_graphql::Request::data`].
pub fn build_schema(services: GraphqlServices) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(batching(UserLoader(services.users.clone())))
        .data(batching(ArticleLoader(services.articles_query.clone())))
        .data(batching(CommentCountLoader(services.comments_query.clone())))
        .data(batching(LikeCountLoader(services.likes_query.clone())))
        .data(services)
        .finish()
}

pub(crate) fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a GraphqlServices> {
    ctx.data::<GraphqlServices>()
}

/// Viewer attached to the request; anonymous when none was attached.
pub(crate) fn viewer(ctx: &Context<'_>) -> Viewer {
    ctx.data_opt::<Viewer>().cloned().unwrap_or_default()
}
