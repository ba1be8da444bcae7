use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/login
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
pub async fn login<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
