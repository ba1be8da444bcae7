//! Todo endpoints; every handler requires a bearer token

use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::{TodoRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::AuthContext;

/// GET /api/todo
pub async fn list_todos<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    match state.todo_service.list(&auth.identity()).await {
        Ok(items) => {
            let body: Vec<TodoResponse> = items.into_iter().map(TodoResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// GET /api/todo/{id}
pub async fn get_todo<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    match state.todo_service.get(&auth.identity(), path.into_inner()).await {
        Ok(item) => HttpResponse::Ok().json(TodoResponse::from(item)),
        Err(error) => handle_domain_error(error),
    }
}

/// POST /api/todo
///
/// The owner is always the caller; any owner or id in the body is ignored.
pub async fn create_todo<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    request: web::Json<CreateTodoRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .todo_service
        .create(&auth.identity(), request.into_inner().into())
        .await
    {
        Ok(item) => HttpResponse::Created()
            .insert_header(("Location", format!("/api/todo/{}", item.id)))
            .json(TodoResponse::from(item)),
        Err(error) => handle_domain_error(error),
    }
}

/// PUT /api/todo/{id}
pub async fn update_todo<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateTodoRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .todo_service
        .update(&auth.identity(), path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}

/// DELETE /api/todo/{id}
pub async fn delete_todo<U, T, D>(
    state: web::Data<AppState<U, T, D>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: TodoRepository + 'static,
{
    match state.todo_service.delete(&auth.identity(), path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
