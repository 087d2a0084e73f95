//! Error mapping between the domain and HTTP responses

pub mod error;

pub use error::{failure_status, json_error_handler, ApiError};
