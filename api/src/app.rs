//! Application state and factory
//!
//! This module holds the shared services and provides the factory for
//! creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::Logger,
    web, App, HttpResponse,
};

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};
use ta_core::services::{AuthService, TodoService};
use ta_shared::{error_codes, CorsConfig, Environment, ErrorResponse};

use crate::handlers::IntoHttpResponse;
use crate::middleware::{auth::AccessTokenVerifier, cors::create_cors, JwtAuth};
use crate::routes::{auth, external, health, todo};

/// Application state that holds shared services
pub struct AppState<U, T, D>
where
    U: UserRepository,
    T: TokenRepository,
    D: TodoRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub todo_service: Arc<TodoService<D>>,
    /// Shared secret of the external sign-in front end; `None` disables the callback route
    pub external_auth_key: Option<String>,
}

impl<U, T, D> AppState<U, T, D>
where
    U: UserRepository,
    T: TokenRepository,
    D: TodoRepository,
{
    pub fn new(
        auth_service: Arc<AuthService<U, T>>,
        todo_service: Arc<TodoService<D>>,
        external_auth_key: Option<String>,
    ) -> Self {
        Self {
            auth_service,
            todo_service,
            external_auth_key,
        }
    }
}

/// Registers every route on `cfg`
pub fn configure_routes<U, T, D>(cfg: &mut web::ServiceConfig, external_login_enabled: bool)
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register::<U, T, D>))
                    .route("/login", web::post().to(auth::login::<U, T, D>))
                    .route("/refresh", web::post().to(auth::refresh_token::<U, T, D>))
                    .route("/me", web::get().to(auth::me::<U, T, D>).wrap(JwtAuth::new())),
            )
            .service(
                web::scope("/todo")
                    .wrap(JwtAuth::new())
                    .route("", web::get().to(todo::list_todos::<U, T, D>))
                    .route("", web::post().to(todo::create_todo::<U, T, D>))
                    .route("/{id}", web::get().to(todo::get_todo::<U, T, D>))
                    .route("/{id}", web::put().to(todo::update_todo::<U, T, D>))
                    .route("/{id}", web::delete().to(todo::delete_todo::<U, T, D>)),
            )
            .configure(|cfg| {
                if external_login_enabled {
                    cfg.route(
                        "/externalauth/callback",
                        web::post().to(external::external_callback::<U, T, D>),
                    );
                }
            }),
    );
}

/// Create and configure the application with all dependencies
pub fn create_app<U, T, D>(
    app_state: web::Data<AppState<U, T, D>>,
    cors: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.token_service().clone();
    let external_login_enabled = app_state.external_auth_key.is_some();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let response = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string())
                .into_http(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        }))
        .wrap(Logger::default())
        .wrap(create_cors(cors, environment))
        .configure(|cfg| configure_routes::<U, T, D>(cfg, external_login_enabled))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .into_http(StatusCode::NOT_FOUND)
}
