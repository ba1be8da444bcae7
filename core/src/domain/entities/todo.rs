//! Todo item entity and its write models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Store-assigned identifier
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a todo; the owner comes from the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub is_completed: bool,
}

/// Replacement values for an existing todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: String,
    pub is_completed: bool,
}
