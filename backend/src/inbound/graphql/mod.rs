//! GraphQL adapter: schema, resolvers, batching loaders and error mapping.
//!
//! Resolvers validate arguments into domain values, read the request
//! [`Viewer`](crate::domain::Viewer) for authorization and call the driving
//! ports bundled in [`GraphqlServices`].

mod error;
mod loaders;
mod mutation;
mod query;
mod schema;
mod types;

pub use error::{classify, graphql_error};
pub use loaders::{ArticleLoader, CommentCountLoader, LikeCountLoader, UserLoader};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use schema::{AppSchema, GraphqlServices, build_schema};
pub use types::SortOrder;
