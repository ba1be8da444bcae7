//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use serde_json::Value;

use ta_api::AppState;
use ta_core::repositories::{MockTodoRepository, MockTokenRepository, MockUserRepository};
use ta_core::services::{AuthService, AuthServiceConfig, TodoService, TokenService, TokenServiceConfig};

pub const SECRET: &str = "api-tests-signing-secret";
pub const ISSUER: &str = "todo-auth";
pub const AUDIENCE: &str = "todo-auth-clients";
pub const EXTERNAL_KEY: &str = "front-end-shared-secret";
pub const PASSWORD: &str = "Secret1!";

pub type TestState = AppState<MockUserRepository, MockTokenRepository, MockTodoRepository>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
}

pub fn test_context(external_auth_key: Option<&str>) -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let todos = Arc::new(MockTodoRepository::new());

    let token_service = TokenService::new(
        Arc::clone(&tokens),
        TokenServiceConfig::new(SECRET, ISSUER, AUDIENCE),
    )
    .expect("token service config");
    let auth_service = AuthService::new(
        Arc::clone(&users),
        Arc::new(token_service),
        AuthServiceConfig::default(),
    );

    let state = web::Data::new(AppState::new(
        Arc::new(auth_service),
        Arc::new(TodoService::new(todos)),
        external_auth_key.map(str::to_string),
    ));

    TestContext { state, users, tokens }
}

/// Build the full application around `ctx`
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(ta_api::create_app(
            $ctx.state.clone(),
            &ta_shared::CorsConfig::default(),
            ta_shared::Environment::Development,
        ))
        .await
    };
}

pub async fn json_body<B: MessageBody>(response: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
