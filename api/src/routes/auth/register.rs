use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::RegisterRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/register
///
/// Creates a password account and signs it in.
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "Secret1!", "displayName": "Ada" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "q7V...", "expiresAt": "2025-01-01T00:15:00Z" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email, email already registered, or password policy violations
pub async fn register<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    match state
        .auth_service
        .register(&request.email, &request.password, request.display_name.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
