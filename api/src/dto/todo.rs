use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ta_core::domain::entities::todo::{NewTodo, TodoItem, UpdateTodo};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub is_completed: bool,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        Self {
            title: request.title,
            is_completed: request.is_completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub is_completed: bool,
}

impl From<UpdateTodoRequest> for UpdateTodo {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            is_completed: request.is_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TodoItem> for TodoResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            is_completed: item.is_completed,
            owner_id: item.owner_id,
            created_at: item.created_at,
        }
    }
}
