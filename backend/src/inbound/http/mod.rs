//! HTTP inbound adapter: the GraphQL endpoint and health probes.

pub mod graphql;
pub mod health;

pub use graphql::{GraphqlState, graphiql, graphql_endpoint, viewer_from_headers};
pub use health::{HealthState, live, ready};
