//! Business services containing domain logic and use cases.

pub mod auth;
pub mod todo;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, PasswordPolicy};
pub use todo::TodoService;
pub use token::{TokenService, TokenServiceConfig};
