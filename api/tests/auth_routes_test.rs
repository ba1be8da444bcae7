//! Integration tests for the account and token endpoints

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{bearer, json_body, test_context, PASSWORD};
use ta_core::repositories::UserRepository;

#[actix_web::test]
async fn test_register_returns_token_pair() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": PASSWORD, "displayName": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body["accessToken"].as_str().unwrap().split('.').count() == 3);
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
    assert!(body["expiresAt"].as_str().unwrap().ends_with('Z'));
}

#[actix_web::test]
async fn test_register_rejects_weak_password_with_violations() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "ada@example.com", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "PASSWORD_POLICY");
    assert!(!body["details"]["violations"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_register_rejects_duplicate_email() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "ada@example.com", "password": PASSWORD }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::BAD_REQUEST {
            assert_eq!(json_body(resp).await["error"], "EMAIL_TAKEN");
        }
    }
}

#[actix_web::test]
async fn test_request_validation_errors() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "not-an-email", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("password").is_some());
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_login_failures_look_identical() {
    let ctx = test_context(None);
    let app = init_app!(ctx);
    ctx.state
        .auth_service
        .register("ada@example.com", PASSWORD, None)
        .await
        .unwrap();

    let mut bodies = Vec::new();
    for (email, password) in [("ada@example.com", "Wrong1!!"), ("nobody@example.com", PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn test_refresh_rotation_over_http() {
    let ctx = test_context(None);
    let app = init_app!(ctx);
    let user = ctx
        .users
        .create(ta_core::User::new("ada@example.com", None), Some(PASSWORD))
        .await
        .unwrap();
    ctx.users.assign_role(user.id, "member").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": PASSWORD }))
        .to_request();
    let first = json_body(test::call_service(&app, req).await).await;
    let r1 = first["refreshToken"].as_str().unwrap().to_string();

    let refresh = |token: &str| {
        test::TestRequest::post()
            .uri("/api/auth/refresh")
            .set_json(json!({ "refreshToken": token }))
            .to_request()
    };

    let resp = test::call_service(&app, refresh(&r1)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second = json_body(resp).await;
    let r2 = second["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(r1, r2);
    assert_ne!(first["accessToken"], second["accessToken"]);

    let replay = test::call_service(&app, refresh(&r1)).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, refresh(&r2)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(ctx.tokens.tokens_for_user(user.id).await.len(), 3);
}

#[actix_web::test]
async fn test_me_returns_profile_with_roles() {
    let ctx = test_context(None);
    let app = init_app!(ctx);
    let tokens = ctx
        .state
        .auth_service
        .register("ada@example.com", PASSWORD, Some("Ada"))
        .await
        .unwrap();
    let user = ctx.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    ctx.users.assign_role(user.id, "admin").await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&tokens.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["displayName"], "Ada");
    assert_eq!(body["roles"], json!(["admin"]));
}

#[actix_web::test]
async fn test_me_requires_bearer_token() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_is_json_not_found() {
    let ctx = test_context(None);
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_concurrent_refresh_over_http_has_one_winner() {
    let ctx = test_context(None);
    let app = init_app!(ctx);
    let login = ctx
        .state
        .auth_service
        .register("ada@example.com", PASSWORD, None)
        .await
        .unwrap();

    let request = || {
        test::TestRequest::post()
            .uri("/api/auth/refresh")
            .set_json(json!({ "refreshToken": login.refresh_token }))
            .to_request()
    };
    let (a, b) = tokio::join!(
        test::call_service(&app, request()),
        test::call_service(&app, request())
    );

    let mut statuses = [a.status(), b.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);
}
