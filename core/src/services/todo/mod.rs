//! Todo service module
//!
//! Owner-scoped CRUD over todo items. Every operation takes the caller's
//! identity explicitly and never sees another user's rows.

mod service;


pub use service::TodoService;
