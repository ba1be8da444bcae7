//! Authentication route handlers
//!
//! This module contains the account endpoints:
//! - Registration and password login
//! - Refresh token exchange
//! - Current user profile

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

pub use login::login;
pub use me::me;
pub use refresh::refresh_token;
pub use register::register;
