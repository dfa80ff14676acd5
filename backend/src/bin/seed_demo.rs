//! Apply a named example-data seed to a database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use scribe::domain::ports::SeedingResult;
use scribe::example_data::{DEFAULT_SEED_NAME, SeedAdapters, apply_seed, default_registry_path};
use scribe::outbound::persistence::{
    DbPool, DieselExampleDataSeedRepository, PoolConfig, run_pending_migrations,
};
use scribe::outbound::security::Argon2Hasher;
use tokio::runtime::Builder;

/// `scribe-seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scribe-seed",
    about = "Seed a Scribe database with deterministic demo users, articles, comments and likes",
    version
)]
struct CliArgs {
    /// Seed name from the registry.
    #[arg(long = "seed", value_name = "name", default_value = DEFAULT_SEED_NAME)]
    seed_name: String,
    /// Override the number of generated users.
    #[arg(long = "users", value_name = "count")]
    user_count: Option<usize>,
    /// Registry file. Defaults to the bundled registry.
    #[arg(long = "registry", value_name = "path")]
    registry_path: Option<PathBuf>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let registry_path = args.registry_path.unwrap_or_else(default_registry_path);
    let adapters = SeedAdapters {
        repository: Arc::new(DieselExampleDataSeedRepository::new(pool)),
        hasher: Arc::new(Argon2Hasher::default()),
        clock: Arc::new(DefaultClock),
    };
    let outcome = apply_seed(&registry_path, &args.seed_name, args.user_count, adapters)
        .await
        .map_err(|error| io::Error::other(format!("seed command failed: {error}")))?;

    let status = match outcome.result {
        SeedingResult::Applied => "applied",
        SeedingResult::AlreadySeeded => "already-seeded",
    };
    println!("status={status}");
    println!("seed_key={}", outcome.seed_key);
    println!("users={}", outcome.user_count);
    println!("articles={}", outcome.article_count);
    println!("comments={}", outcome.comment_count);
    println!("likes={}", outcome.like_count);
    Ok(())
}

fn resolve_database_url(cli_value: Option<String>) -> io::Result<String> {
    cli_value
        .or_else(|| env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: pass --database-url or set DATABASE_URL",
            )
        })
}
