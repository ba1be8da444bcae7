//! Todo service implementation

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::TodoRepository;

const TODO_RESOURCE: &str = "todo";

pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All of the caller's todos
    pub async fn list(&self, identity: &AuthenticatedUser) -> DomainResult<Vec<TodoItem>> {
        self.repository.list_by_owner(identity.user_id).await
    }

    /// One of the caller's todos
    ///
    /// A todo owned by someone else is reported as `NotFound`, same as a
    /// missing one.
    pub async fn get(&self, identity: &AuthenticatedUser, id: i64) -> DomainResult<TodoItem> {
        self.repository
            .find_by_id(id, identity.user_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Create a todo owned by the caller
    pub async fn create(&self, identity: &AuthenticatedUser, todo: NewTodo) -> DomainResult<TodoItem> {
        let title = require_title(&todo.title)?;
        let item = self
            .repository
            .create(
                identity.user_id,
                NewTodo {
                    title,
                    is_completed: todo.is_completed,
                },
            )
            .await?;

        info!(user_id = %identity.user_id, todo_id = item.id, "Todo created");
        Ok(item)
    }

    /// Replace the title and completion flag of one of the caller's todos
    pub async fn update(&self, identity: &AuthenticatedUser, id: i64, todo: UpdateTodo) -> DomainResult<()> {
        let title = require_title(&todo.title)?;
        let updated = self
            .repository
            .update(
                id,
                identity.user_id,
                UpdateTodo {
                    title,
                    is_completed: todo.is_completed,
                },
            )
            .await?;

        if !updated {
            debug!(user_id = %identity.user_id, todo_id = id, "Update rejected: todo not found");
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn delete(&self, identity: &AuthenticatedUser, id: i64) -> DomainResult<()> {
        if !self.repository.delete(id, identity.user_id).await? {
            debug!(user_id = %identity.user_id, todo_id = id, "Delete rejected: todo not found");
            return Err(not_found());
        }

        info!(user_id = %identity.user_id, todo_id = id, "Todo deleted");
        Ok(())
    }
}

fn require_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "title".to_string(),
        });
    }
    Ok(title.to_string())
}

fn not_found() -> DomainError {
    DomainError::NotFound {
        resource: TODO_RESOURCE.to_string(),
    }
}
