//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the phone verification
//! service. It provides concrete implementations for the seams the core crate
//! defines: prefix and verification storage, the verification cache, the
//! statistics store and the carrier lookup API.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx
//! - **Cache**: Redis client, Redis-backed and process-local verification caches
//! - **Stats**: Redis-backed and in-memory counter stores
//! - **Carrier**: reqwest client for the carrier lookup API
//! - **Memory**: in-process repositories for local runs and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use pv_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and verification cache backends
pub mod cache;

/// Carrier module - HTTP client for the carrier lookup API
pub mod carrier;

/// Health probes for backing services
pub mod health;

/// In-process repositories
pub mod memory;

/// Statistics counter stores
pub mod stats;

#[cfg(feature = "mysql")]
mod bootstrap;

#[cfg(feature = "mysql")]
pub use bootstrap::{initialize, Infrastructure, MySqlVerificationService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
