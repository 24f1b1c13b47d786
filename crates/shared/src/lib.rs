//! Shared types, errors, and configuration for the ERP service.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token validation
//! - Nonces for state-changing admin links

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod nonce;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use nonce::NonceService;
