//! Process configuration read from the environment.
//!
//! Parsing goes through [`mockable::Env`] so every rule is unit-testable.
//! Debug builds fall back to development defaults with a warning where
//! release builds refuse to start.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use rand::RngCore;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

pub const PORT_ENV: &str = "PORT";
pub const BIND_HOST_ENV: &str = "BIND_HOST";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const NODE_ENV_ENV: &str = "NODE_ENV";
pub const RESPONSE_DELAY_ENV: &str = "RESPONSE_DELAY_MS";
pub const CORS_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";
pub const POOL_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";

/// Minimum signing secret length accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEVELOPMENT_DELAY: Duration = Duration::from_millis(1000);
const EPHEMERAL_SECRET_LEN: usize = 64;

const PORT_EXPECTED: &str = "a TCP port between 1 and 65535";
const HOST_EXPECTED: &str = "an IPv4 or IPv6 address";
const NODE_ENV_EXPECTED: &str = "one of production, development, test";
const DELAY_EXPECTED: &str = "a non-negative number of milliseconds";
const POOL_SIZE_EXPECTED: &str = "a positive integer";

/// Compilation mode used to decide whether development fallbacks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Deployment environment named by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Production,
    #[default]
    Development,
    Test,
}

impl RuntimeEnv {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" => Some(Self::Production),
            "development" => Some(Self::Development),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Whether this is a production deployment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Token signing secret. Wiped from memory on drop.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Wrap raw secret bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Random secret valid for the lifetime of the process.
    #[must_use]
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    /// Secret bytes for the signing adapter.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Validated server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub jwt_secret: JwtSecret,
    pub runtime_env: RuntimeEnv,
    /// Delay applied to the greeting query; never set in production.
    pub response_delay: Option<Duration>,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
    pub db_pool_max_size: u32,
}

/// Errors raised while reading settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{name} must be set")]
    MissingEnv { name: &'static str },
    #[error("{name}={value:?} is invalid; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{JWT_SECRET_ENV} must be at least {min_len} bytes (got {length})")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Read every setting from `env`.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use scribe::settings::{BuildMode, settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/scribe".into()),
///     _ => None,
/// });
/// let settings = settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert_eq!(settings.bind_addr.port(), 4000);
/// ```
///
/// # Errors
/// Returns [`SettingsError`] when a variable is missing or malformed and no
/// fallback applies to the build mode.
pub fn settings_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Settings, SettingsError> {
    let runtime_env = runtime_env_from_env(env, mode)?;
    let bind_addr = SocketAddr::new(host_from_env(env)?, port_from_env(env)?);
    let database_url = env
        .string(DATABASE_URL_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(SettingsError::MissingEnv {
            name: DATABASE_URL_ENV,
        })?;
    let jwt_secret = jwt_secret_from_env(env, mode)?;
    let response_delay = response_delay_from_env(env, runtime_env)?;
    let cors_allowed_origin = env
        .string(CORS_ORIGIN_ENV)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    let db_pool_max_size = pool_size_from_env(env)?;

    Ok(Settings {
        bind_addr,
        database_url,
        jwt_secret,
        runtime_env,
        response_delay,
        cors_allowed_origin,
        db_pool_max_size,
    })
}

fn runtime_env_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<RuntimeEnv, SettingsError> {
    let Some(value) = env.string(NODE_ENV_ENV) else {
        return Ok(RuntimeEnv::default());
    };
    match RuntimeEnv::parse(&value) {
        Some(runtime_env) => Ok(runtime_env),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid NODE_ENV; defaulting to development");
            Ok(RuntimeEnv::Development)
        }
        None => Err(SettingsError::InvalidEnv {
            name: NODE_ENV_ENV,
            value,
            expected: NODE_ENV_EXPECTED,
        }),
    }
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, SettingsError> {
    match env.string(PORT_ENV) {
        None => Ok(DEFAULT_PORT),
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(SettingsError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: PORT_EXPECTED,
            }),
        },
    }
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, SettingsError> {
    match env.string(BIND_HOST_ENV) {
        None => Ok(DEFAULT_HOST),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidEnv {
                name: BIND_HOST_ENV,
                value,
                expected: HOST_EXPECTED,
            }),
    }
}

fn jwt_secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<JwtSecret, SettingsError> {
    let Some(value) = env.string(JWT_SECRET_ENV).filter(|value| !value.is_empty()) else {
        if mode.is_debug() {
            warn!("JWT_SECRET not set; using an ephemeral secret (tokens die with the process)");
            return Ok(JwtSecret::ephemeral());
        }
        return Err(SettingsError::MissingEnv {
            name: JWT_SECRET_ENV,
        });
    };
    let secret = JwtSecret::new(Zeroizing::new(value).as_bytes());
    let length = secret.expose().len();
    if length < JWT_SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(length, "JWT_SECRET is shorter than {JWT_SECRET_MIN_LEN} bytes");
        } else {
            return Err(SettingsError::SecretTooShort {
                length,
                min_len: JWT_SECRET_MIN_LEN,
            });
        }
    }
    Ok(secret)
}

fn response_delay_from_env<E: Env>(
    env: &E,
    runtime_env: RuntimeEnv,
) -> Result<Option<Duration>, SettingsError> {
    if runtime_env.is_production() {
        return Ok(None);
    }
    match env.string(RESPONSE_DELAY_ENV) {
        Some(value) => {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: RESPONSE_DELAY_ENV,
                    value,
                    expected: DELAY_EXPECTED,
                })?;
            Ok((millis > 0).then(|| Duration::from_millis(millis)))
        }
        None => Ok(matches!(runtime_env, RuntimeEnv::Development).then_some(DEVELOPMENT_DELAY)),
    }
}

fn pool_size_from_env<E: Env>(env: &E) -> Result<u32, SettingsError> {
    match env.string(POOL_SIZE_ENV) {
        None => Ok(DEFAULT_POOL_MAX_SIZE),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(SettingsError::InvalidEnv {
                name: POOL_SIZE_ENV,
                value,
                expected: POOL_SIZE_EXPECTED,
            }),
        },
    }
}
