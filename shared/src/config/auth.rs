//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

use super::{optional, parse, required, ConfigError};

/// Longest accepted access token lifetime (one week)
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 7 * 24 * 60;

/// Longest accepted refresh token lifetime (ten years)
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HMAC-SHA-256 signing
    #[serde(skip_serializing)]
    pub secret: String,

    /// `iss` claim written into and expected from access tokens
    pub issuer: String,

    /// `aud` claim written into and expected from access tokens
    pub audience: String,

    /// Access token lifetime in minutes
    pub access_token_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_days: i64,
}

impl JwtConfig {
    /// Load from `JWT_*` variables; every value is required
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_minutes =
            lifetime(lookup, "JWT_ACCESS_TOKEN_MINUTES", MAX_ACCESS_TOKEN_MINUTES)?;
        let refresh_token_days = lifetime(lookup, "JWT_REFRESH_TOKEN_DAYS", MAX_REFRESH_TOKEN_DAYS)?;

        Ok(Self {
            secret: required(lookup, "JWT_SECRET")?,
            issuer: required(lookup, "JWT_ISSUER")?,
            audience: required(lookup, "JWT_AUDIENCE")?,
            access_token_minutes,
            refresh_token_days,
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Shared secret presented by the trusted front channel that performs
    /// external (Google) sign-in. The external login route is only mounted
    /// when this is set.
    #[serde(default, skip_serializing)]
    pub external_auth_key: Option<String>,
}

impl AuthConfig {
    /// Create from environment lookups
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            external_auth_key: optional(lookup, "EXTERNAL_AUTH_KEY"),
        })
    }
}

/// A required integer in `1..=max`
fn lifetime<F>(lookup: &F, key: &str, max: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, key)?;
    let value: i64 = parse(key, &raw)?;
    if !(1..=max).contains(&value) {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
            reason: format!("must be a positive integer no greater than {}", max),
        });
    }
    Ok(value)
}
