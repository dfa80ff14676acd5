//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: Define strongly typed domain entities used by the GraphQL and
//! persistence layers, and the services implementing the driving ports.
//! Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): domain error with a stable code.
//! - User, Article, Comment, Like: publishing aggregates.
//! - TimelineKey / PageRequest: keyset pagination primitives.
//! - Viewer: the caller of an operation as derived from its bearer token.

pub mod article;
pub mod article_service;
pub mod auth;
pub mod auth_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod example_data;
pub mod ids;
pub mod like;
pub mod like_service;
pub mod ports;
pub mod timeline;
pub mod tokens;
pub mod trace_id;
pub mod user;
pub mod users_service;
pub mod validation;

pub use self::article::{Article, ArticleChanges, ArticleDraft, ArticleUpdate, TITLE_MAX};
pub use self::article_service::ArticleService;
pub use self::auth::{AuthPayload, LoginCredentials, Registration, Viewer};
pub use self::auth_service::{AuthService, TokenVerifier};
pub use self::comment::{COMMENT_MAX, Comment, CommentContent, CommentDraft, CommentEdit};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::example_data::{
    DEMO_PASSWORD, ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError,
};
pub use self::ids::{ArticleId, CommentId, IdValidationError, LikeId, UserId};
pub use self::like::Like;
pub use self::like_service::LikeService;
pub use self::timeline::{PageRequest, Timeline, TimelineKey, decode_cursor, encode_cursor};
pub use self::tokens::{
    ACCESS_TOKEN_TTL, IssuedToken, REFRESH_TOKEN_TTL, TokenClaims, TokenKind, TokenPair,
};
pub use self::trace_id::TraceId;
pub use self::user::{Email, NAME_MAX, PASSWORD_MIN, Password, User, UserName, UserValidationError};
pub use self::users_service::UsersService;
pub use self::validation::ValidationIssues;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use scribe::domain::{DomainResult, Error};
///
/// fn guarded() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(guarded().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
