//! Callback for the trusted external sign-in front end
//!
//! The front end completes the provider handshake and posts the verified
//! email here, authenticating itself with the `X-External-Auth-Key` shared
//! secret. The route is only mounted when `EXTERNAL_AUTH_KEY` is configured.

use actix_web::{web, HttpRequest, HttpResponse};
use constant_time_eq::constant_time_eq;

use ta_core::errors::{AuthError, DomainError};
use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::ExternalLoginRequest;
use crate::handlers::handle_domain_error;

pub const EXTERNAL_AUTH_KEY_HEADER: &str = "X-External-Auth-Key";

/// Handler for POST /api/externalauth/callback
///
/// ## Errors
/// - 400 Bad Request: No email supplied by the provider
/// - 401 Unauthorized: Missing or wrong shared secret
pub async fn external_callback<U, T, D>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<ExternalLoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    let presented = req
        .headers()
        .get(EXTERNAL_AUTH_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let authorized = match (state.external_auth_key.as_deref(), presented) {
        (Some(expected), Some(presented)) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
        _ => false,
    };
    if !authorized {
        log::warn!("External login callback rejected: bad shared secret");
        return handle_domain_error(DomainError::Auth(AuthError::ExternalAuthFailed));
    }

    match state
        .auth_service
        .external_login(request.email.as_deref(), request.display_name.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
