//! Apply a registry seed at startup or on demand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{RegistryError, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{CredentialHasher, ExampleDataSeedRepository, SeedingResult};
use crate::domain::{ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError};
use crate::example_data::config::{ExampleDataSettings, SeedPlan};

/// Errors returned while seeding from a registry file.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Adapters used to apply a seed.
pub struct SeedAdapters<R> {
    pub repository: Arc<R>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub clock: Arc<dyn Clock>,
}

/// Apply example data on startup when `EXAMPLE_DATA_ENABLED` is set.
///
/// Returns `Ok(None)` when seeding is disabled.
pub async fn seed_example_data_on_startup<R>(
    settings: &ExampleDataSettings,
    adapters: SeedAdapters<R>,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError>
where
    R: ExampleDataSeedRepository,
{
    let Some(SeedPlan {
        seed_name,
        user_count,
        registry_path,
    }) = settings.plan()
    else {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    };
    let outcome = apply_seed(&registry_path, &seed_name, user_count, adapters).await?;
    Ok(Some(outcome))
}

/// Load `registry_path` and apply `seed_name` once.
///
/// # Errors
/// Fails when the registry cannot be read, the seed is unknown, or the
/// repository rejects the write.
pub async fn apply_seed<R>(
    registry_path: &Path,
    seed_name: &str,
    user_count: Option<usize>,
    adapters: SeedAdapters<R>,
) -> Result<ExampleDataSeedOutcome, StartupSeedingError>
where
    R: ExampleDataSeedRepository,
{
    let seed_name = seed_name.trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }
    let registry = load_registry(registry_path)?;
    let SeedAdapters {
        repository,
        hasher,
        clock,
    } = adapters;
    let outcome = ExampleDataSeeder::new(repository, hasher, clock)
        .seed_from_registry(&registry, seed_name, user_count)
        .await?;

    match outcome.result {
        SeedingResult::Applied => info!(
            seed_key = %outcome.seed_key,
            users = outcome.user_count,
            articles = outcome.article_count,
            comments = outcome.comment_count,
            likes = outcome.like_count,
            "example data seeding applied"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_key = %outcome.seed_key,
            "example data seed already applied; skipping"
        ),
    }
    Ok(outcome)
}

/// Read a seed registry through a capability-scoped directory handle.
pub fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
