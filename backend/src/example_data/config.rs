//! Demo seeding settings, read from `EXAMPLE_DATA_*` through OrthoConfig.
//!
//! Seeding is opt-in. A fresh scribe deployment starts empty unless
//! `EXAMPLE_DATA_ENABLED=true`, in which case the bundled `quiet-heron`
//! seed (a handful of writers with articles, comments and likes) is applied
//! once per database.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Seed applied when `EXAMPLE_DATA_SEED_NAME` is unset.
pub const DEFAULT_SEED_NAME: &str = "quiet-heron";

/// `fixtures/example-data/seeds.json` inside the backend crate.
pub fn default_registry_path() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "fixtures", "example-data", "seeds.json"]
        .iter()
        .collect()
}

/// Raw `EXAMPLE_DATA_*` settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// `EXAMPLE_DATA_ENABLED`: apply the seed while the server boots.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// `EXAMPLE_DATA_SEED_NAME`: registry entry to apply.
    pub seed_name: Option<String>,
    /// `EXAMPLE_DATA_COUNT`: writers to generate instead of the seed's own
    /// `userCount`.
    #[ortho_config(file_key = "user_count")]
    pub count: Option<usize>,
    /// `EXAMPLE_DATA_REGISTRY_PATH`: alternative registry file.
    pub registry_path: Option<PathBuf>,
}

/// Seeding work resolved from [`ExampleDataSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub seed_name: String,
    pub user_count: Option<usize>,
    pub registry_path: PathBuf,
}

impl ExampleDataSettings {
    /// Resolve the startup seeding plan, or `None` when seeding is off.
    ///
    /// The seed name is trimmed; an unset name selects [`DEFAULT_SEED_NAME`]
    /// while a blank one is kept blank so seeding rejects it.
    pub fn plan(&self) -> Option<SeedPlan> {
        self.enabled.then(|| SeedPlan {
            seed_name: self
                .seed_name
                .as_deref()
                .map_or(DEFAULT_SEED_NAME, str::trim)
                .to_owned(),
            user_count: self.count,
            registry_path: self
                .registry_path
                .clone()
                .unwrap_or_else(default_registry_path),
        })
    }
}
