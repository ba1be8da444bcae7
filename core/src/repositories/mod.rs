pub mod todo;
pub mod token;
pub mod user;

pub use todo::TodoRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use todo::MockTodoRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;
