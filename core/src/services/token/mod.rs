//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access token minting and verification
//! - Opaque refresh token generation
//! - Single-use refresh token rotation

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
