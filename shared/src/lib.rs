//! Shared utilities and common types for the Instagram backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
