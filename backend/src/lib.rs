//! Scribe backend: a GraphQL publishing API over PostgreSQL.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, services and
//! ports; [`inbound`] drives them from HTTP and GraphQL; [`outbound`]
//! implements the driven ports with Diesel, Argon2 and JWT.

pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
