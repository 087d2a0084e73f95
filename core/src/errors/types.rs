//! Failure taxonomy for verification outcomes and the carrier seam

use pv_shared::errors::ErrorResponse;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable reason attached to every failed verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Input contained no digits
    InvalidInput,
    PrefixNotFound,
    /// Known prefix, but the number is too short
    PartialMatch,
    /// Known prefix, but the number is too long
    LengthMismatch,
    AmbiguousPrefix,
    /// Carrier credentials are not configured
    ConfigError,
    /// Transport failure, timeout or non-200 reply
    ApiError,
    EmptyResponse,
    Exception,
    /// Carrier answered with a nonzero status
    LookupFailed,
    InternalError,
    /// Batch cancelled before this item was processed
    Cancelled,
}

impl FailureReason {
    pub fn as_code(&self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "invalid_input",
            FailureReason::PrefixNotFound => "prefix_not_found",
            FailureReason::PartialMatch => "partial_match",
            FailureReason::LengthMismatch => "length_mismatch",
            FailureReason::AmbiguousPrefix => "ambiguous_prefix",
            FailureReason::ConfigError => "config_error",
            FailureReason::ApiError => "api_error",
            FailureReason::EmptyResponse => "empty_response",
            FailureReason::Exception => "exception",
            FailureReason::LookupFailed => "lookup_failed",
            FailureReason::InternalError => "internal_error",
            FailureReason::Cancelled => "cancelled",
        }
    }

    /// Carrier-facing status text for reasons produced by the API call
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            FailureReason::ConfigError => Some("Configuration Error"),
            FailureReason::ApiError => Some("API Error"),
            FailureReason::EmptyResponse => Some("Empty API Response"),
            FailureReason::Exception => Some("Exception Error"),
            _ => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Errors raised by a carrier lookup implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarrierError {
    #[error("Carrier API credentials not configured")]
    MissingCredentials,

    #[error("API request failed: {message}")]
    Transport { message: String },

    #[error("API request failed with status: {status}")]
    HttpStatus { status: u16 },

    #[error("API returned an empty response. Please check API credentials.")]
    EmptyResponse,

    #[error("{message}")]
    Unexpected { message: String },
}

impl CarrierError {
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            CarrierError::MissingCredentials => FailureReason::ConfigError,
            CarrierError::Transport { .. } | CarrierError::HttpStatus { .. } => {
                FailureReason::ApiError
            }
            CarrierError::EmptyResponse => FailureReason::EmptyResponse,
            CarrierError::Unexpected { .. } => FailureReason::Exception,
        }
    }
}

impl From<CarrierError> for ErrorResponse {
    fn from(err: CarrierError) -> Self {
        let reason = err.failure_reason();
        ErrorResponse::new(reason.as_code(), err.to_string())
            .add_detail("status_message", reason.status_message())
    }
}
