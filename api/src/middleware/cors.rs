//! CORS middleware configuration for cross-origin requests.
//!
//! Origins listed in `ALLOWED_ORIGINS` are always honoured. With no list,
//! development allows any origin and every other environment allows none.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ta_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        if environment.is_development() {
            log::info!("Configuring permissive CORS for development");
            return cors.allow_any_origin();
        }
        log::warn!("No ALLOWED_ORIGINS configured; cross-origin requests will be refused");
        return cors;
    }

    config.allowed_origins.iter().fold(cors, |cors, origin| {
        log::info!("Adding allowed origin: {}", origin);
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, environment: Environment, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config, environment))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();

        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let status = preflight(CorsConfig::default(), Environment::Development, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_configured_origins_only() {
        let config = CorsConfig {
            allowed_origins: vec!["https://todo.example.com".to_string()],
            ..CorsConfig::default()
        };

        let allowed = preflight(config.clone(), Environment::Production, "https://todo.example.com").await;
        let refused = preflight(config, Environment::Production, "https://evil.example.com").await;

        assert_eq!(allowed, StatusCode::OK);
        assert_ne!(refused, StatusCode::OK);
    }
}
