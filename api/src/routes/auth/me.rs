use actix_web::{web, HttpResponse};

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me (requires bearer token)
///
/// Returns `{ id, email, displayName, roles }` for the caller. Roles come
/// from the directory, not from the token.
pub async fn me<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    match state.auth_service.current_user(&auth.identity()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(error),
    }
}
