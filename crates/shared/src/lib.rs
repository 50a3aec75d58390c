//! Shared errors, configuration, and token handling for Flow ERP.
//!
//! This crate provides the pieces every other crate leans on:
//! - Application-wide error taxonomy
//! - Layered configuration loading
//! - JWT claims and the token service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService, TokenSubject};
