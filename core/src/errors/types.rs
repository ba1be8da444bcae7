//! Domain-specific error types for authentication and related operations
//!
//! Messages here are developer-facing. The presentation layer decides what
//! a client gets to see for each variant.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases share this variant so
    /// callers cannot tell which one happened.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Email not provided by external provider")]
    ExternalEmailMissing,

    #[error("External authentication failed")]
    ExternalAuthFailed,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// Missing, expired, revoked or already rotated refresh token
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password does not meet policy: {}", violations.join("; "))]
    PasswordPolicy { violations: Vec<String> },
}
