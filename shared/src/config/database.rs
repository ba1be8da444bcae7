//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, required, ConfigError};

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(skip_serializing)]
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl DatabaseConfig {
    /// Create from environment lookups. `DATABASE_URL` is required.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: required(lookup, "DATABASE_URL")?,
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout: parse_or(lookup, "DATABASE_CONNECT_TIMEOUT", 30)?,
            idle_timeout: parse_or(lookup, "DATABASE_IDLE_TIMEOUT", 600)?,
            max_lifetime: parse_or(lookup, "DATABASE_MAX_LIFETIME", 1800)?,
        })
    }

    /// Create a new database configuration with URL and default pool limits
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
