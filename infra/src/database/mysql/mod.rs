//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod todo_repository_impl;
pub mod token_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use todo_repository_impl::MySqlTodoRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

/// Maps a SQLx failure to the domain's internal error
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> ta_core::errors::DomainError {
    tracing::error!(error = %e, "{}", context);
    ta_core::errors::DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// True when the statement hit a unique key
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
