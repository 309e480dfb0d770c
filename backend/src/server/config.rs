//! Layered application settings and the derived server configuration.
//!
//! [`AppSettings`] loads from CLI flags, `BISTRO_*` environment variables and
//! configuration files through OrthoConfig. Accessors apply defaults so the
//! rest of the binary never sees an unset value.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use backend::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use pagination::{PageDefaults, PaginationError};
use serde::Deserialize;

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Settings for the `bistro` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BISTRO")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without it, data lives in memory.
    pub database_url: Option<String>,
    /// Interface to listen on.
    pub bind_host: Option<IpAddr>,
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Page size used when a request names none.
    pub default_page_limit: Option<u32>,
    /// Largest page size a request may ask for.
    pub max_page_limit: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host.unwrap_or(DEFAULT_BIND_HOST), self.port)
    }

    /// Pool settings, when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
            .with_min_idle(Some(
                self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE),
            ))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ));
        Some(config)
    }

    /// Page limits for list endpoints.
    ///
    /// # Errors
    /// Rejects a default of zero or a default above the maximum.
    pub fn page_defaults(&self) -> Result<PageDefaults, PaginationError> {
        let fallback = PageDefaults::default();
        PageDefaults::new(
            self.default_page_limit.unwrap_or(fallback.default_limit()),
            self.max_page_limit.unwrap_or(fallback.max_limit()),
        )
    }
}

/// Everything `create_server` needs, resolved from [`AppSettings`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_defaults: PageDefaults,
}

impl ServerConfig {
    /// # Errors
    /// Fails when the configured page limits are inconsistent.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, PaginationError> {
        Ok(Self {
            bind_addr: settings.bind_addr(),
            page_defaults: settings.page_defaults()?,
        })
    }
}
