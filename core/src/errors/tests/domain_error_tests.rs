use crate::errors::*;

#[test]
fn test_credential_failures_are_unauthenticated() {
    assert_eq!(
        DomainError::Auth(AuthError::InvalidCredentials).kind(),
        ErrorKind::Unauthenticated
    );
    assert_eq!(
        DomainError::Token(TokenError::InvalidRefreshToken).kind(),
        ErrorKind::Unauthenticated
    );
    assert_eq!(DomainError::Unauthorized.kind(), ErrorKind::Unauthenticated);
}

#[test]
fn test_input_problems_are_invalid_requests() {
    assert_eq!(
        DomainError::Auth(AuthError::EmailAlreadyRegistered).kind(),
        ErrorKind::InvalidRequest
    );
    assert_eq!(
        DomainError::Auth(AuthError::ExternalEmailMissing).kind(),
        ErrorKind::InvalidRequest
    );
    let policy = ValidationError::PasswordPolicy {
        violations: vec!["a".to_string()],
    };
    assert_eq!(DomainError::from(policy).kind(), ErrorKind::InvalidRequest);
}

#[test]
fn test_persistence_failures_are_server_faults() {
    let err = DomainError::Internal {
        message: "connection reset".to_string(),
    };
    assert_eq!(err.kind(), ErrorKind::ServerFault);
    assert_eq!(
        DomainError::Token(TokenError::TokenGenerationFailed).kind(),
        ErrorKind::ServerFault
    );
}

#[test]
fn test_password_policy_message_lists_violations() {
    let err = ValidationError::PasswordPolicy {
        violations: vec!["too short".to_string(), "needs a digit".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Password does not meet policy: too short; needs a digit"
    );
}
