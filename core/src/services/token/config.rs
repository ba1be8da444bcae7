//! Configuration for the token service

use ta_shared::config::{JwtConfig, MAX_ACCESS_TOKEN_MINUTES, MAX_REFRESH_TOKEN_DAYS};

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC-SHA-256 signing secret
    pub jwt_secret: String,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl TokenServiceConfig {
    /// Config with default lifetimes (15 minutes / 7 days)
    pub fn new(
        jwt_secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }

    /// Reject configurations that could never mint a usable token
    ///
    /// Lifetimes are bounded so that expiry instants always stay in range.
    pub fn validate(&self) -> Result<(), DomainError> {
        let problem = if self.jwt_secret.is_empty() {
            Some("JWT secret must not be empty")
        } else if self.issuer.trim().is_empty() {
            Some("JWT issuer must not be empty")
        } else if self.audience.trim().is_empty() {
            Some("JWT audience must not be empty")
        } else if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&self.access_token_expiry_minutes) {
            Some("access token lifetime must be between 1 minute and one week")
        } else if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&self.refresh_token_expiry_days) {
            Some("refresh token lifetime must be between 1 day and ten years")
        } else {
            None
        };

        match problem {
            Some(message) => Err(DomainError::Configuration {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_expiry_minutes: jwt.access_token_minutes,
            refresh_token_expiry_days: jwt.refresh_token_days,
        }
    }
}
