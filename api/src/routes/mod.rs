//! HTTP route handlers

pub mod auth;
pub mod external;
pub mod health;
pub mod todo;
