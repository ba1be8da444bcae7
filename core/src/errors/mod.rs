//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

/// Coarse classification every caller maps onto a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials or tokens were rejected; carries no detail
    Unauthenticated,
    /// Malformed or policy-violating input
    InvalidRequest,
    NotFound,
    /// Service misconfigured; only raised at startup
    ConfigurationFault,
    /// Persistence or other internal failure
    ServerFault,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                ErrorKind::InvalidRequest
            }
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Unauthorized => ErrorKind::Unauthenticated,
            DomainError::Internal { .. } => ErrorKind::ServerFault,
            DomainError::Configuration { .. } => ErrorKind::ConfigurationFault,
            DomainError::Auth(auth) => match auth {
                AuthError::InvalidCredentials | AuthError::ExternalAuthFailed => {
                    ErrorKind::Unauthenticated
                }
                AuthError::EmailAlreadyRegistered | AuthError::ExternalEmailMissing => {
                    ErrorKind::InvalidRequest
                }
            },
            DomainError::Token(token) => match token {
                TokenError::TokenGenerationFailed => ErrorKind::ServerFault,
                TokenError::TokenExpired
                | TokenError::InvalidTokenFormat
                | TokenError::InvalidRefreshToken => ErrorKind::Unauthenticated,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
