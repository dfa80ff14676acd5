//! Backend entry-point: reads settings, migrates, seeds and serves GraphQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use scribe::example_data::{ExampleDataSettings, SeedAdapters, seed_example_data_on_startup};
use scribe::inbound::http::HealthState;
use scribe::outbound::persistence::{
    DbPool, DieselExampleDataSeedRepository, PoolConfig, run_pending_migrations,
};
use scribe::outbound::security::Argon2Hasher;
use scribe::settings::{BuildMode, settings_from_env};
use server::{ServerConfig, create_server};

const DEFAULT_LOG_FILTER: &str = "info";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    info!(
        bind_addr = %settings.bind_addr,
        runtime_env = ?settings.runtime_env,
        "starting scribe"
    );

    run_pending_migrations(&settings.database_url)
        .await
        .map_err(|e| io::Error::other(format!("database migration failed: {e}")))?;

    let pool = DbPool::new(
        PoolConfig::new(&settings.database_url).with_max_size(settings.db_pool_max_size),
    )
    .await
    .map_err(|e| io::Error::other(format!("create database pool: {e}")))?;

    seed_on_startup(&pool).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(&settings, pool))?;
    server.await
}

async fn seed_on_startup(pool: &DbPool) -> io::Result<()> {
    let example_data = ExampleDataSettings::load_from_iter([OsString::from("scribe")])
        .map_err(|e| io::Error::other(format!("example data configuration: {e}")))?;
    let adapters = SeedAdapters {
        repository: Arc::new(DieselExampleDataSeedRepository::new(pool.clone())),
        hasher: Arc::new(Argon2Hasher::default()),
        clock: Arc::new(DefaultClock),
    };
    seed_example_data_on_startup(&example_data, adapters)
        .await
        .map_err(|e| io::Error::other(format!("example data seeding failed: {e}")))?;
    Ok(())
}
