pub mod auth;
pub mod todo;

pub use auth::*;
pub use todo::*;
