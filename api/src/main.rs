use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::{error, info};

use ta_api::{create_app, AppState};
use ta_core::services::{AuthService, AuthServiceConfig, TodoService, TokenService, TokenServiceConfig};
use ta_infra::database::{DatabasePool, MySqlTodoRepository, MySqlTokenRepository, MySqlUserRepository};
use ta_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));
    info!("Starting TodoAuth API Server ({})", config.environment);

    // Persistence
    let pool = DatabasePool::new(&config.database).await?;
    pool.run_migrations().await?;
    let db = pool.get_pool().clone();

    let user_repository = Arc::new(MySqlUserRepository::new(db.clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(db.clone()));
    let todo_repository = Arc::new(MySqlTodoRepository::new(db));

    // Services
    let token_service = Arc::new(TokenService::new(
        token_repository,
        TokenServiceConfig::from(&config.auth.jwt),
    )?);
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        AuthServiceConfig::default(),
    ));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    if config.auth.external_auth_key.is_none() {
        info!("EXTERNAL_AUTH_KEY not set; external login callback disabled");
    }
    let state = web::Data::new(AppState::new(
        auth_service,
        todo_service,
        config.auth.external_auth_key.clone(),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    pool.close().await;
    Ok(())
}
