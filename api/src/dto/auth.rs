use serde::{Deserialize, Serialize};
use validator::Validate;

pub use ta_core::domain::value_objects::{AuthResponse, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    /// Checked against the password policy by the service
    #[validate(length(min = 1))]
    pub password: String,

    #[validate(length(max = 256))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Identity asserted by the trusted external sign-in front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLoginRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}
