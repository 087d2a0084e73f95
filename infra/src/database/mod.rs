//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The prefix table repository (exact and starts-with lookups)
//! - The verification table repository (latest-by-number reads, upserts)

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlPrefixRepository, MySqlVerificationRepository};
