//! # Phone Verification API
//!
//! Actix-web surface over the verification service: prefix checks for
//! live-typing feedback, single and batch verification, and record and
//! cache maintenance.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
