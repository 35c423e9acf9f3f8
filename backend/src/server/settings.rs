//! Application settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECT_ATTEMPTS: u32 = 10;
const DEFAULT_DB_CONNECT_DELAY_MS: u64 = 500;

/// Listener and database settings, read from `FLEET_*` variables, CLI
/// flags or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLEET")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string; the in-memory adapters are used without it.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// How often to probe the database before giving up at startup.
    pub db_connect_attempts: Option<u32>,
    /// Pause between startup probes, in milliseconds.
    pub db_connect_delay_ms: Option<u64>,
}

impl AppSettings {
    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip = host.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid FLEET_HOST {host:?}: {err}"),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn db_connect_attempts(&self) -> u32 {
        self.db_connect_attempts
            .unwrap_or(DEFAULT_DB_CONNECT_ATTEMPTS)
            .max(1)
    }

    pub fn db_connect_delay(&self) -> Duration {
        Duration::from_millis(
            self.db_connect_delay_ms
                .unwrap_or(DEFAULT_DB_CONNECT_DELAY_MS),
        )
    }
}
