use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use validator::ValidationErrors;

use pv_core::errors::{DomainError, FailureReason};
use pv_shared::errors::{error_codes, ErrorResponse};
use pv_shared::ApiResponse;

/// Errors returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing request data
    #[error("{0}")]
    Validation(String),

    /// Field-level validation failures from a request body
    #[error("{}", first_message(.0))]
    InvalidFields(ValidationErrors),

    #[error("Batch of {size} numbers exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidFields(errors)
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::InvalidFields(_) => error_codes::VALIDATION_ERROR,
            ApiError::BatchTooLarge { .. } => error_codes::BATCH_TOO_LARGE,
            ApiError::NotFound(_) => error_codes::NOT_FOUND,
            ApiError::Domain(DomainError::Validation { .. })
            | ApiError::Domain(DomainError::AmbiguousPrefix { .. }) => error_codes::PHONE_INVALID,
            ApiError::Domain(DomainError::NotFound { .. }) => error_codes::NOT_FOUND,
            ApiError::Domain(DomainError::Storage { .. }) => error_codes::DATABASE_ERROR,
            ApiError::Domain(DomainError::Internal { .. }) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Message safe to hand to clients; storage details stay in the logs
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Storage { .. }) => {
                "Database error occurred while processing the request".to_string()
            }
            ApiError::Domain(DomainError::Internal { .. }) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let mut response = ErrorResponse::new(self.code(), self.public_message());
        match self {
            ApiError::InvalidFields(errors) => {
                for (field, failures) in errors.field_errors() {
                    let messages: Vec<String> = failures
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    response = response.add_detail(field, messages);
                }
            }
            ApiError::BatchTooLarge { size, max } => {
                response = response.add_detail("size", size).add_detail("max_batch_size", max);
            }
            ApiError::Domain(DomainError::AmbiguousPrefix { prefix, candidates }) => {
                response = response
                    .add_detail("found_prefix", prefix)
                    .add_detail("candidates", candidates);
            }
            _ => {}
        }
        response
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidFields(_) => StatusCode::BAD_REQUEST,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::AmbiguousPrefix { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Storage { .. })
            | ApiError::Domain(DomainError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::warn!(error = %self, code = self.code(), "Request rejected");
        }

        HttpResponse::build(status).json(ApiResponse::failure(
            self.public_message(),
            self.to_error_response(),
        ))
    }
}

/// HTTP status for a failed single verification
pub fn failure_status(reason: FailureReason) -> StatusCode {
    match reason {
        FailureReason::InvalidInput => StatusCode::BAD_REQUEST,
        FailureReason::PrefixNotFound
        | FailureReason::PartialMatch
        | FailureReason::LengthMismatch
        | FailureReason::AmbiguousPrefix => StatusCode::UNPROCESSABLE_ENTITY,
        FailureReason::ConfigError
        | FailureReason::ApiError
        | FailureReason::EmptyResponse
        | FailureReason::Exception
        | FailureReason::LookupFailed => StatusCode::BAD_GATEWAY,
        FailureReason::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        FailureReason::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Report unreadable JSON bodies in the usual error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid request body: {}", err)).into()
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|failures| failures.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request data".to_string())
}
