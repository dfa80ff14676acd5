//! Wire Diesel repositories and security adapters into the GraphQL state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use scribe::domain::ports::{CredentialHasher, TokenService};
use scribe::domain::{
    ArticleService, AuthService, CommentService, LikeService, TokenVerifier, UsersService,
};
use scribe::inbound::graphql::{GraphqlServices, build_schema};
use scribe::inbound::http::GraphqlState;
use scribe::outbound::persistence::{
    DieselArticleRepository, DieselCommentRepository, DieselLikeRepository,
    DieselRefreshTokenRepository, DieselUserRepository,
};
use scribe::outbound::security::{Argon2Hasher, JwtTokenService};

use super::ServerConfig;

/// Build the schema and bearer verifier over the configured pool.
pub(crate) fn build_graphql_state(config: &ServerConfig) -> GraphqlState {
    let pool = &config.db_pool;
    let users_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let articles_repo = Arc::new(DieselArticleRepository::new(pool.clone()));
    let comments_repo = Arc::new(DieselCommentRepository::new(pool.clone()));
    let likes_repo = Arc::new(DieselLikeRepository::new(pool.clone()));
    let refresh_repo = Arc::new(DieselRefreshTokenRepository::new(pool.clone()));

    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::default());
    let tokens: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::new(config.jwt_secret.expose()));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let articles = Arc::new(ArticleService::new(
        articles_repo.clone(),
        comments_repo.clone(),
        clock.clone(),
    ));
    let comments = Arc::new(CommentService::new(
        comments_repo,
        articles_repo.clone(),
        clock.clone(),
    ));
    let likes = Arc::new(LikeService::new(likes_repo, articles_repo, clock.clone()));

    let services = GraphqlServices {
        auth: Arc::new(AuthService::new(
            users_repo.clone(),
            refresh_repo,
            hasher,
            tokens.clone(),
            clock.clone(),
        )),
        users: Arc::new(UsersService::new(users_repo)),
        articles: articles.clone(),
        articles_query: articles,
        comments: comments.clone(),
        comments_query: comments,
        likes: likes.clone(),
        likes_query: likes,
        response_delay: config.response_delay,
    };

    GraphqlState::new(
        build_schema(services),
        Arc::new(TokenVerifier::new(tokens, clock)),
    )
}
