//! Mapping from domain failures to HTTP responses
//!
//! Authentication failures carry a fixed message and no detail. Server
//! faults are logged here and answered with a generic message.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use validator::ValidationErrors;

use ta_core::errors::{AuthError, DomainError, ErrorKind, TokenError, ValidationError};
use ta_shared::{error_codes, ErrorResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Renders a shared `ErrorResponse` as an actix response
pub trait IntoHttpResponse {
    fn into_http(self, status: StatusCode) -> HttpResponse;
}

impl IntoHttpResponse for ErrorResponse {
    fn into_http(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// HTTP status for each error class
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ConfigurationFault | ErrorKind::ServerFault => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_body(error: &DomainError) -> ErrorResponse {
    match error.kind() {
        ErrorKind::Unauthenticated => {
            let code = match error {
                DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
                DomainError::Token(TokenError::InvalidTokenFormat) => error_codes::TOKEN_INVALID,
                _ => error_codes::UNAUTHORIZED,
            };
            ErrorResponse::new(code, error.to_string())
        }
        ErrorKind::InvalidRequest => match error {
            DomainError::Auth(AuthError::EmailAlreadyRegistered) => {
                ErrorResponse::new(error_codes::EMAIL_TAKEN, error.to_string())
            }
            DomainError::ValidationErr(ValidationError::PasswordPolicy { violations }) => {
                ErrorResponse::new(error_codes::PASSWORD_POLICY, "Password does not meet policy")
                    .add_detail("violations", violations)
            }
            DomainError::ValidationErr(ValidationError::RequiredField { field }) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())
                    .add_detail("field", field)
            }
            DomainError::ValidationErr(_) | DomainError::Validation { .. } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())
            }
            _ => ErrorResponse::new(error_codes::BAD_REQUEST, error.to_string()),
        },
        ErrorKind::NotFound => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        ErrorKind::ConfigurationFault | ErrorKind::ServerFault => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE)
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let kind = error.kind();
    match kind {
        ErrorKind::ConfigurationFault | ErrorKind::ServerFault => {
            log::error!("Request failed: {}", error)
        }
        _ => log::debug!("Request rejected: {}", error),
    }

    error_body(&error).into_http(status_for(kind))
}

/// 400 response listing the fields that failed request validation
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");
    for (field, failures) in errors.field_errors() {
        let codes: Vec<String> = failures.iter().map(|f| f.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }
    response.into_http(StatusCode::BAD_REQUEST)
}

/// `DomainError` as an actix error, for middleware and extractors
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.0.kind())
    }

    fn error_response(&self) -> HttpResponse {
        error_body(&self.0).into_http(self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_credentials_error_is_unauthorized() {
        let response = handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn test_password_policy_lists_violations() {
        let error = DomainError::ValidationErr(ValidationError::PasswordPolicy {
            violations: vec!["too short".to_string(), "needs a digit".to_string()],
        });

        let response = handle_domain_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "PASSWORD_POLICY");
        assert_eq!(body["details"]["violations"][1], "needs a digit");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_message() {
        let response = handle_domain_error(DomainError::Internal {
            message: "connection refused to 10.0.0.5".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::InvalidRequest), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(DomainError::Token(TokenError::TokenExpired)).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
