//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fleet_backend::inbound::http::health::HealthState;
use fleet_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use fleet_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting HTTP server");
    let result = create_server(health_state.clone(), config)?.await;
    health_state.mark_unhealthy();
    result
}

/// Open the pool, wait for the database and apply pending migrations.
///
/// Returns `None` when no database is configured.
async fn connect_database(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        return Ok(None);
    };

    let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(err.into_message()))?;
    pool.wait_until_ready(settings.db_connect_attempts(), settings.db_connect_delay())
        .await
        .map_err(|err| io::Error::other(err.into_message()))?;
    run_pending_migrations(url).await.map_err(io::Error::other)?;
    Ok(Some(pool))
}
