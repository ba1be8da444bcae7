//! Authentication service module
//!
//! This module provides the authentication flows:
//! - Password registration and login
//! - External (provider-verified email) login
//! - Single-use refresh token exchange
//! - Current user profile

mod config;
mod password_policy;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password_policy::PasswordPolicy;
pub use service::AuthService;
