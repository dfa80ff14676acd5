//! Error types for the example-data crate.
//!
//! Registry errors cover loading and validating the seed registry; generation
//! errors cover producing a dataset from a seed definition.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seeds share the same name.
    #[error("seed name '{name}' appears more than once")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during dataset generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Articles, comments, or likes were requested without any users to
    /// author them.
    #[error("seed '{seed}' requests content but has no users to author it")]
    NoAuthors {
        /// Seed name being generated.
        seed: String,
    },

    /// Comments or likes were requested without any articles to attach to.
    #[error("seed '{seed}' requests comments or likes but has no articles")]
    NoArticles {
        /// Seed name being generated.
        seed: String,
    },

    /// A valid author name could not be produced.
    #[error("failed to generate a valid author name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
