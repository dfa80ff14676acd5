//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` connection pool.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types; no business logic lives here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every Diesel and pool failure is mapped to the owning port's error type.
//!
//! # Example
//!
//! ```no_run
//! use scribe::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/scribe")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_article_repository;
mod diesel_basic_error_mapping;
mod diesel_comment_repository;
mod diesel_example_data_seed_repository;
mod diesel_helpers;
mod diesel_like_repository;
mod diesel_refresh_token_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_example_data_seed_repository::DieselExampleDataSeedRepository;
pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_refresh_token_repository::DieselRefreshTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
