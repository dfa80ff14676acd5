//! Inbound adapters translating external requests into domain calls.
//!
//! [`http`] owns the actix-web surface and hands GraphQL operations to the
//! schema built in [`graphql`].

pub mod graphql;
pub mod http;
