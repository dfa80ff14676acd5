//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`AccessTokenVerifier`]) are called by
//! inbound adapters. Driven ports (`*Repository`, [`TokenService`],
//! [`CredentialHasher`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod article_use_cases;
mod auth_command;
mod comment_repository;
mod comment_use_cases;
mod credential_hasher;
mod example_data_seed_repository;
mod like_repository;
mod like_use_cases;
mod refresh_token_repository;
mod token_service;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticleListQuery, ArticlePersistenceError, ArticleRepository};
#[cfg(test)]
pub use article_use_cases::{MockArticlesCommand, MockArticlesQuery};
pub use article_use_cases::{ArticlesCommand, ArticlesQuery};
#[cfg(test)]
pub use auth_command::{MockAccessTokenVerifier, MockAuthCommand};
pub use auth_command::{AccessTokenVerifier, AuthCommand};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentListQuery, CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use comment_use_cases::{MockCommentsCommand, MockCommentsQuery};
pub use comment_use_cases::{CommentsCommand, CommentsQuery};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use example_data_seed_repository::MockExampleDataSeedRepository;
pub use example_data_seed_repository::{
    ExampleDataSeedArticle, ExampleDataSeedComment, ExampleDataSeedLike,
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    ExampleDataSeedUser, SeedingResult, try_seed_to_i64,
};
#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::{LikePersistenceError, LikeRepository};
#[cfg(test)]
pub use like_use_cases::{MockLikesCommand, MockLikesQuery};
pub use like_use_cases::{LikesCommand, LikesQuery};
#[cfg(test)]
pub use refresh_token_repository::MockRefreshTokenRepository;
pub use refresh_token_repository::{
    NewRefreshToken, RefreshTokenPersistenceError, RefreshTokenRepository, StoredRefreshToken,
};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

#[cfg(test)]
mod tests;
