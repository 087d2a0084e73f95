use actix_web::{web, HttpResponse};
use tracing_actix_web::RequestId;
use validator::Validate;

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_core::{FreshnessPreference, VerificationOutcome};
use pv_shared::phone::mask_phone_number;
use pv_shared::ApiResponse;

use crate::dto::{BatchVerifyRequest, BatchVerifyResponse, VerifyRequest};
use crate::handlers::{failure_status, ApiError};

use super::AppState;

fn parse_freshness(value: Option<&str>) -> Result<FreshnessPreference, ApiError> {
    FreshnessPreference::from_wire(value).map_err(ApiError::Validation)
}

/// Handler for POST /api/v1/verify
///
/// # Request Body
///
/// ```json
/// { "phone_number": "85592313242", "data_freshness": "30" }
/// ```
///
/// Verified and skipped numbers answer 200 with the outcome. Failed
/// verifications answer with a status chosen by the failure reason and the
/// outcome (including `reason`) in `data`.
pub async fn verify_phone<P, R, C, L, T>(
    request_id: RequestId,
    state: web::Data<AppState<P, R, C, L, T>>,
    request: web::Json<VerifyRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    request.validate()?;
    let preference = parse_freshness(request.data_freshness.as_deref())?;

    let outcome = state
        .verification_service
        .verify(&request.phone_number, preference)
        .await;

    tracing::info!(
        number = %mask_phone_number(outcome.number()),
        source = outcome.source().map(|s| s.as_str()).unwrap_or("none"),
        failed = outcome.is_failed(),
        event = "verify_request",
        "Verification request handled"
    );

    let response = match &outcome {
        VerificationOutcome::Failed(failure) => {
            let status = failure_status(failure.reason);
            let message = failure.message.clone();
            HttpResponse::build(status).json(
                ApiResponse::failure(message, outcome).with_request_id(request_id.to_string()),
            )
        }
        _ => HttpResponse::Ok()
            .json(ApiResponse::success(outcome).with_request_id(request_id.to_string())),
    };
    Ok(response)
}

/// Handler for POST /api/v1/verify/batch
///
/// # Request Body
///
/// ```json
/// { "phone_numbers": ["85592313242", "85510123456"], "data_freshness": "" }
/// ```
///
/// Blank entries are dropped. Outcomes are grouped into live coverage,
/// no coverage and error lists; per-number failures never fail the request.
pub async fn verify_batch<P, R, C, L, T>(
    request_id: RequestId,
    state: web::Data<AppState<P, R, C, L, T>>,
    request: web::Json<BatchVerifyRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    request.validate()?;
    let preference = parse_freshness(request.data_freshness.as_deref())?;

    let numbers = request.numbers();
    if numbers.is_empty() {
        return Err(ApiError::Validation("No phone numbers provided".to_string()));
    }

    let max = state.settings.max_batch_size;
    if numbers.len() > max {
        return Err(ApiError::BatchTooLarge {
            size: numbers.len(),
            max,
        });
    }

    let result = state
        .verification_service
        .verify_batch(numbers.as_slice(), preference)
        .await;

    let response = BatchVerifyResponse::from(result);
    tracing::info!(
        processed = response.processed,
        live_coverage = response.live_coverage_count,
        no_coverage = response.no_coverage_count,
        errors = response.error_count,
        api_calls = response.statistics.api_calls,
        event = "batch_request",
        "Batch verification handled"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_request_id(request_id.to_string())))
}
