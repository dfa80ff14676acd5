//! Demo content seeding from the bundled registry.

mod config;
mod startup;

pub use config::{DEFAULT_SEED_NAME, ExampleDataSettings, SeedPlan, default_registry_path};
pub use startup::{
    SeedAdapters, StartupSeedingError, apply_seed, load_registry, seed_example_data_on_startup,
};
