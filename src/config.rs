//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::upstream::DEFAULT_BASE_URL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base address of the catalog API
    pub upstream_base_url: String,
    /// MySQL connection string; comments are kept in memory when unset
    pub database_url: Option<String>,
    /// Connection pool size for the comment store
    pub database_max_connections: u32,
    /// Redis endpoint; catalog documents are cached in memory when unset
    pub redis_url: Option<String>,
    /// Prefix applied to every Redis key
    pub redis_instance_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5071)
    /// - `UPSTREAM_BASE_URL` - Catalog API address (default: https://ghibli.rest/)
    /// - `DATABASE_URL` - MySQL connection string (optional)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `REDIS_URL` - Redis endpoint (optional)
    /// - `REDIS_INSTANCE_NAME` - Redis key prefix (default: ghibli_)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: non_empty("UPSTREAM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            redis_url: non_empty("REDIS_URL"),
            redis_instance_name: env::var("REDIS_INSTANCE_NAME")
                .unwrap_or(defaults.redis_instance_name),
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5071,
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            database_url: None,
            database_max_connections: 5,
            redis_url: None,
            redis_instance_name: "ghibli_".to_string(),
        }
    }
}
