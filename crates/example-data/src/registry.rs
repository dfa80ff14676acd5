//! Seed registry types and JSON parsing.
//!
//! The registry holds named seed definitions. Each definition fixes the RNG
//! seed and how many users, articles, comments, and likes to generate.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seed definitions.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "userCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// let seed = registry.find_seed("test").expect("seed exists");
/// assert_eq!(seed.user_count(), 5);
/// assert_eq!(seed.article_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, no seeds are defined, or a seed name repeats.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::with_capacity(raw.seeds.len());
        for seed in &raw.seeds {
            if !names.insert(seed.name.as_str()) {
                return Err(RegistryError::DuplicateSeedName {
                    name: seed.name.clone(),
                });
            }
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                user_count: s.user_count,
                article_count: s.article_count,
                comment_count: s.comment_count,
                like_count: s.like_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed definition for deterministic dataset generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    article_count: usize,
    comment_count: usize,
    like_count: usize,
}

impl SeedDefinition {
    /// Build a definition directly, bypassing the registry.
    ///
    /// # Example
    ///
    /// ```
    /// use example_data::SeedDefinition;
    ///
    /// let def = SeedDefinition::new("adhoc", 1).with_counts(2, 3, 4, 5);
    /// assert_eq!(def.like_count(), 5);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            seed,
            user_count: 0,
            article_count: 0,
            comment_count: 0,
            like_count: 0,
        }
    }

    /// Replace all content counts.
    #[must_use]
    pub const fn with_counts(
        mut self,
        users: usize,
        articles: usize,
        comments: usize,
        likes: usize,
    ) -> Self {
        self.user_count = users;
        self.article_count = articles;
        self.comment_count = comments;
        self.like_count = likes;
        self
    }

    /// Override only the number of users.
    #[must_use]
    pub const fn with_user_count(mut self, users: usize) -> Self {
        self.user_count = users;
        self
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }

    /// Returns the number of articles to generate.
    #[must_use]
    pub const fn article_count(&self) -> usize {
        self.article_count
    }

    /// Returns the number of comments to generate.
    #[must_use]
    pub const fn comment_count(&self) -> usize {
        self.comment_count
    }

    /// Returns the number of likes requested. Fewer may be produced when the
    /// user/article grid has fewer distinct pairs.
    #[must_use]
    pub const fn like_count(&self) -> usize {
        self.like_count
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
    #[serde(default)]
    article_count: usize,
    #[serde(default)]
    comment_count: usize,
    #[serde(default)]
    like_count: usize,
}
