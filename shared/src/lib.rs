//! Shared utilities and common types for the TodoAuth server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the startup configuration error
//! - Error response structures
//! - Utility functions (email normalization and validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
