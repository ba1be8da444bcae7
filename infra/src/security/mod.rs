//! Security primitives backed by external crates

pub mod password;

pub use password::PasswordHasher;
