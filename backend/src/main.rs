//! Backend entry-point: loads settings, prepares storage and serves probes
//! and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::{HealthState, StorageKind};
use backend::outbound::persistence::{DbPool, run_migrations};
use backend::registry::ServiceRegistry;
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let config = ServerConfig::from_settings(&settings).wrap_err("invalid page limits")?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let server = match settings.pool_config() {
        Some(pool_config) => {
            run_migrations(pool_config.database_url())
                .await
                .wrap_err("failed to apply migrations")?;
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build connection pool")?;
            let health = web::Data::new(HealthState::new(StorageKind::Postgres));
            create_server(health, ServiceRegistry::postgres(&pool, clock), config)?
        }
        None => {
            warn!("no database configured; data will not outlive this process");
            let health = web::Data::new(HealthState::new(StorageKind::Memory));
            create_server(health, ServiceRegistry::in_memory(clock), config)?
        }
    };

    info!(addr = %settings.bind_addr(), "listening");
    server.await?;
    Ok(())
}
