//! Embedded PostgreSQL databases for the Diesel adapter suites.
//!
//! Every test receives its own database cloned from a template that already
//! carries the migrations. The template is keyed by a hash of
//! `migrations/`, so editing a migration provisions a fresh one.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these suites where PostgreSQL binaries
//! cannot be fetched or started; otherwise a setup failure fails the test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use scribe::domain::ports::{NewUser, UserRepository};
use scribe::domain::{Email, User, UserName};
use scribe::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_PREFIX: &str = "scribe_template";
const PROVISION_ATTEMPTS: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated database plus the runtime that drives its pool.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    /// Run `future` to completion on the database's runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Insert a user with a placeholder hash.
    pub fn user(&self, email: &str) -> User {
        let users = DieselUserRepository::new(self.pool.clone());
        let new_user = NewUser {
            email: Email::new(email).expect("valid email"),
            name: Some(UserName::new("Writer").expect("valid name")),
            password_hash: "argon2-placeholder".to_owned(),
            created_at: at(0),
        };
        self.block_on(users.create(&new_user)).expect("user inserted")
    }
}

/// Whole-second instants survive the microsecond TIMESTAMPTZ round trip.
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0)
        .single()
        .expect("valid base instant")
        + chrono::TimeDelta::seconds(seconds)
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Provision a database, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` allows skipping.
pub fn test_database() -> Option<TestDatabase> {
    match provision() {
        Ok(database) => Some(database),
        Err(reason) if skip_requested() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}

fn provision() -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = clone_template(cluster, &runtime)?;
    let config = PoolConfig::new(database.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(TestDatabase {
        runtime,
        pool,
        _database: database,
    })
}

fn clone_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("no provisioning attempt ran");
    for attempt in 1..=PROVISION_ATTEMPTS {
        let cloned = ensure_template(cluster, runtime).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match cloned {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_ATTEMPTS}: {error}"),
        }
        if attempt < PROVISION_ATTEMPTS {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

fn ensure_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let template = format!("{TEMPLATE_PREFIX}_{}", hash.get(..8).unwrap_or(&hash));

    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let exists = cluster
        .database_exists(template.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template);
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
    }
    Ok(template)
}
