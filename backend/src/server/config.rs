//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use scribe::outbound::persistence::DbPool;
use scribe::settings::{JwtSecret, Settings};

/// Everything the server needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) response_delay: Option<Duration>,
    pub(crate) cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    /// Combine validated settings with a ready pool.
    #[must_use]
    pub fn new(settings: &Settings, db_pool: DbPool) -> Self {
        Self {
            bind_addr: settings.bind_addr,
            db_pool,
            jwt_secret: settings.jwt_secret.clone(),
            response_delay: settings.response_delay,
            cors_allowed_origin: settings.cors_allowed_origin.clone(),
        }
    }
}
