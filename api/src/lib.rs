//! # TodoAuth API
//!
//! HTTP surface of the TodoAuth backend: account and token endpoints plus
//! the owner-scoped todo resource.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
