//! Shared utilities and common types for the phone verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (database, cache, carrier API, verification settings)
//! - Error and response envelope structures
//! - Phone number utilities (digit cleaning, masking for logs)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CacheStrategyConfig, CacheType, CarrierApiConfig, DatabaseConfig,
    Environment, LoggingConfig, ServerConfig, VerificationSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
pub use utils::phone;
