//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Token signing and external login configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Every section is read from the process environment. Required values that
//! are missing or malformed produce a [`ConfigError`]; the server refuses to
//! start in that case.

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, MAX_ACCESS_TOKEN_MINUTES, MAX_REFRESH_TOKEN_DAYS};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Startup configuration failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key} ({value}): {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map-backed closure instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup)?;

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            auth: AuthConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup, environment),
        })
    }
}

/// Read a required, non-blank value
pub(crate) fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing {
            key: key.to_string(),
        }),
    }
}

/// Read an optional value, treating blank as absent
pub(crate) fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Parse a value into `T`, reporting the key on failure
pub(crate) fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an optional value, falling back to `default` only when absent
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key) {
        Some(value) => parse(key, &value),
        None => Ok(default),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{lookup, COMPLETE};
    use super::*;

    fn with<'a>(extra: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut pairs: Vec<(&str, &str)> = COMPLETE
            .iter()
            .copied()
            .filter(|(k, _)| !extra.iter().any(|(e, _)| e == k))
            .collect();
        pairs.extend_from_slice(extra);
        pairs
    }

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(lookup(pairs))
    }

    #[test]
    fn test_complete_configuration_loads_with_defaults() {
        let config = AppConfig::from_lookup(lookup(COMPLETE)).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt.access_token_minutes, 15);
        assert_eq!(config.auth.jwt.refresh_token_days, 7);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.auth.external_auth_key.is_none());
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let pairs: Vec<(&str, &str)> = COMPLETE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "JWT_SECRET")
            .collect();

        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                key: "JWT_SECRET".to_string()
            }
        );
    }

    #[test]
    fn test_blank_issuer_counts_as_missing() {
        let err = load(&with(&[("JWT_ISSUER", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key } if key == "JWT_ISSUER"));
    }

    #[test]
    fn test_malformed_lifetime_is_invalid() {
        let err = load(&with(&[("JWT_ACCESS_TOKEN_MINUTES", "fifteen")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "JWT_ACCESS_TOKEN_MINUTES"));
    }

    #[test]
    fn test_non_positive_lifetime_is_invalid() {
        let err = load(&with(&[("JWT_REFRESH_TOKEN_DAYS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "JWT_REFRESH_TOKEN_DAYS"));
    }

    #[test]
    fn test_oversized_lifetimes_are_invalid() {
        let err = load(&with(&[("JWT_REFRESH_TOKEN_DAYS", "100000000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "JWT_REFRESH_TOKEN_DAYS"));

        let err = load(&with(&[("JWT_ACCESS_TOKEN_MINUTES", "9223372036854775807")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "JWT_ACCESS_TOKEN_MINUTES"));

        let config = load(&with(&[("JWT_REFRESH_TOKEN_DAYS", "3650")])).unwrap();
        assert_eq!(config.auth.jwt.refresh_token_days, MAX_REFRESH_TOKEN_DAYS);
    }

    #[test]
    fn test_malformed_port_is_not_silently_defaulted() {
        let err = load(&with(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "SERVER_PORT"));
    }

    #[test]
    fn test_optional_values_override_defaults() {
        let config = load(&with(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9000"),
            ("ENVIRONMENT", "production"),
            ("EXTERNAL_AUTH_KEY", "shared-secret"),
            ("ALLOWED_ORIGINS", "https://todo.example.com, https://admin.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert!(config.environment.is_production());
        assert_eq!(config.auth.external_auth_key.as_deref(), Some("shared-secret"));
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }
}
