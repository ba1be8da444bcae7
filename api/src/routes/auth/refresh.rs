use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/refresh
///
/// Exchanges a refresh token for a new access/refresh pair. The presented
/// token is consumed.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "q7V..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, expired, revoked or already used refresh token
/// - 500 Internal Server Error: Store failure
pub async fn refresh_token<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::RefreshTokenRequest;
    use validator::Validate;

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let request: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken":"test_token_123"}"#).unwrap();

        assert_eq!(request.refresh_token, "test_token_123");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_refresh_token_fails_validation() {
        let request = RefreshTokenRequest {
            refresh_token: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
