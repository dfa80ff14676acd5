//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2 credential hashing and JWT signing
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;
