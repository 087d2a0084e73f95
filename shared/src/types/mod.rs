//! Type definitions shared by the HTTP surface and the services
//!
//! - `response` - API response wrappers and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
