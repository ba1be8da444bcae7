//! Domain entities representing core business objects.

pub mod todo;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use todo::{NewTodo, TodoItem, UpdateTodo};
pub use token::{
    AccessToken, Claims, RefreshToken, RefreshTokenState, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_BYTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::User;
