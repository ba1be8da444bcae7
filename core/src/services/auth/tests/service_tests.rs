//! Sign-in, registration and profile tests

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::fixtures::{create_test_service, PASSWORD};
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError, ErrorKind, ValidationError};
use crate::repositories::{MockTokenRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

/// Directory whose email index claims every address is taken while no
/// account can be found for it
struct InconsistentUserRepository;

#[async_trait]
impl UserRepository for InconsistentUserRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(None)
    }

    async fn create(&self, _user: User, _password: Option<&str>) -> Result<User, DomainError> {
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    }

    async fn verify_password(&self, _user_id: Uuid, _password: &str) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn get_roles(&self, _user_id: Uuid) -> Result<Vec<String>, DomainError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let h = create_test_service();

    let registered = h
        .service
        .register("Ada@Example.com ", PASSWORD, Some("Ada"))
        .await
        .unwrap();
    let logged_in = h.service.login("ada@example.com", PASSWORD).await.unwrap();

    assert!(!registered.access_token.is_empty());
    assert_ne!(registered.refresh_token, logged_in.refresh_token);

    let user = h.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Ada"));
    assert_eq!(h.tokens.tokens_for_user(user.id).await.len(), 2);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, None).await.unwrap();

    let wrong_password = h.service.login("ada@example.com", "Wrong1!!").await.unwrap_err();
    let unknown_email = h.service.login("nobody@example.com", PASSWORD).await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.kind(), ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, None).await.unwrap();

    let err = h
        .service
        .register("ADA@example.com", PASSWORD, None)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(h.users.count().await, 1);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let h = create_test_service();

    let err = h
        .service
        .register("ada@example.com", "password", None)
        .await
        .unwrap_err();

    match err {
        DomainError::ValidationErr(ValidationError::PasswordPolicy { violations }) => {
            assert_eq!(violations.len(), 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(h.users.count().await, 0);
    assert!(h.tokens.is_empty().await);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let h = create_test_service();

    let err = h.service.register("not-an-email", PASSWORD, None).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidEmail)));
}

#[tokio::test]
async fn test_blank_display_name_is_dropped() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, Some("   ")).await.unwrap();

    let user = h.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert!(user.display_name.is_none());
}

#[tokio::test]
async fn test_login_embeds_current_roles() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, None).await.unwrap();
    let user = h.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    h.users.assign_role(user.id, "member").await;

    let response = h.service.login("ada@example.com", PASSWORD).await.unwrap();
    let claims = h
        .service
        .token_service()
        .verify_access_token(&response.access_token)
        .unwrap();

    assert_eq!(claims.roles, vec!["member".to_string()]);
    assert_eq!(claims.email, "ada@example.com");
}

#[tokio::test]
async fn test_external_login_creates_then_reuses_account() {
    let h = create_test_service();

    h.service
        .external_login(Some("Grace@Example.com"), Some("Grace Hopper"))
        .await
        .unwrap();
    h.service
        .external_login(Some("grace@example.com"), Some("Ignored"))
        .await
        .unwrap();

    assert_eq!(h.users.count().await, 1);
    let user = h.users.find_by_email("grace@example.com").await.unwrap().unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(h.tokens.tokens_for_user(user.id).await.len(), 2);
}

#[tokio::test]
async fn test_external_account_cannot_password_login() {
    let h = create_test_service();
    h.service.external_login(Some("grace@example.com"), None).await.unwrap();

    let err = h.service.login("grace@example.com", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_external_login_requires_email() {
    let h = create_test_service();

    for email in [None, Some(""), Some("   ")] {
        let err = h.service.external_login(email, Some("Someone")).await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::ExternalEmailMissing)));
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }
    assert_eq!(h.users.count().await, 0);
}

#[tokio::test]
async fn test_external_login_for_existing_password_account() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, None).await.unwrap();

    h.service.external_login(Some("ada@example.com"), None).await.unwrap();

    assert_eq!(h.users.count().await, 1);
    h.service.login("ada@example.com", PASSWORD).await.unwrap();
}

#[tokio::test]
async fn test_current_user_profile() {
    let h = create_test_service();
    h.service.register("ada@example.com", PASSWORD, Some("Ada")).await.unwrap();
    let user = h.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    h.users.assign_role(user.id, "member").await;

    let identity = AuthenticatedUser::new(user.id, user.email.clone(), Vec::new());
    let profile = h.service.current_user(&identity).await.unwrap();

    assert_eq!(profile.id, user.id);
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.display_name.as_deref(), Some("Ada"));
    assert_eq!(profile.roles, vec!["member".to_string()]);
}

#[tokio::test]
async fn test_current_user_for_vanished_account() {
    let h = create_test_service();
    let identity = AuthenticatedUser::new(Uuid::new_v4(), "ghost@example.com", Vec::new());

    let err = h.service.current_user(&identity).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_external_login_with_inconsistent_directory_is_server_fault() {
    let tokens = Arc::new(MockTokenRepository::new());
    let token_service = TokenService::new(
        Arc::clone(&tokens),
        TokenServiceConfig::new("auth-tests-secret", "todo-auth", "todo-auth-clients"),
    )
    .unwrap();
    let service = AuthService::new(
        Arc::new(InconsistentUserRepository),
        Arc::new(token_service),
        AuthServiceConfig::default(),
    );

    let err = service
        .external_login(Some("grace@example.com"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Internal { .. }));
    assert_eq!(err.kind(), ErrorKind::ServerFault);
    assert!(tokens.is_empty().await);
}
