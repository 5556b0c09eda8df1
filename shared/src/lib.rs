//! Shared utilities and common types for the Gatekeep server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and environment loading
//! - The JSON error response shape
//! - Input validation helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CacheType, ConfigError, CookieConfig, DatabaseConfig,
    Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
