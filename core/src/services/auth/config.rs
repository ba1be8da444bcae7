//! Configuration for the authentication service

use super::password_policy::PasswordPolicy;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Rules new passwords must satisfy
    pub password_policy: PasswordPolicy,
}
