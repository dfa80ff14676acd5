//! Deterministic demo content generation for Scribe.
//!
//! This crate turns a named seed from a JSON registry into a believable,
//! reproducible publishing dataset: authors, their articles, comments on those
//! articles, and likes. It is independent of backend domain types; the
//! backend converts the generated records at the point of use.
//!
//! # Overview
//!
//! - Load seed registries from JSON strings or files
//! - Generate a dataset deterministically from a named seed
//! - Guarantee unique author emails and unique (user, article) likes
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_dataset};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "quiet-heron",
//!         "seed": 7,
//!         "userCount": 3,
//!         "articleCount": 4,
//!         "commentCount": 5,
//!         "likeCount": 6
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("quiet-heron").expect("seed exists");
//! let dataset = generate_dataset(seed_def).expect("generation succeeds");
//!
//! assert_eq!(dataset.users.len(), 3);
//! assert_eq!(dataset.articles.len(), 4);
//! assert_eq!(dataset.likes.len(), 6);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_dataset;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    ExampleArticleSeed, ExampleCommentSeed, ExampleDataset, ExampleLikeSeed, ExampleUserSeed,
};
pub use validation::{NAME_MAX, is_valid_email, is_valid_name};
