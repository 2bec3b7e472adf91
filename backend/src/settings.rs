//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `RIDESHARE_*` environment variables and
//! configuration files. Optional fields fall back to defaults in the accessors.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::JoinRetryPolicy;
use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address could not be parsed as `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime settings for the rideshare server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RIDESHARE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Attempts a join makes before giving up on revision conflicts.
    #[ortho_config(default = 8)]
    pub join_max_attempts: u32,
    /// JSON file of rides loaded into the in-memory store at startup.
    pub seed_path: Option<PathBuf>,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to the persistence default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
            .max(1)
    }

    /// Build the join retry policy from the configured attempt count.
    pub fn join_retry_policy(&self) -> JoinRetryPolicy {
        JoinRetryPolicy::new(self.join_max_attempts)
    }

    /// Return the seed file path, if any.
    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }
}
