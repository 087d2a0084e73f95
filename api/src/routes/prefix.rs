use actix_web::{web, HttpResponse};
use tracing_actix_web::RequestId;
use validator::Validate;

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_shared::phone::mask_phone_number;
use pv_shared::ApiResponse;

use crate::dto::{PrefixCheckRequest, PrefixCheckResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/prefix/check
///
/// Live-typing feedback: resolves the number against the prefix table
/// without touching the cache, the database or the carrier.
///
/// # Request Body
///
/// ```json
/// { "phone_number": "855 92 313 242" }
/// ```
///
/// Always 200 once the lookup ran; `success` tells whether the number
/// resolved, and `data.match` says how far it got (`resolved`,
/// `partial_match`, `length_mismatch`, `not_found`).
pub async fn check_prefix<P, R, C, L, T>(
    request_id: RequestId,
    state: web::Data<AppState<P, R, C, L, T>>,
    request: web::Json<PrefixCheckRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    request.validate()?;

    let resolution = state
        .verification_service
        .check_prefix(&request.phone_number)
        .await?;

    tracing::debug!(
        number = %mask_phone_number(resolution.cleaned_number()),
        resolved = resolution.is_resolved(),
        "Prefix checked"
    );

    let resolved = resolution.is_resolved();
    let body = PrefixCheckResponse::from(resolution);
    let envelope = if resolved {
        ApiResponse::success(body)
    } else {
        ApiResponse::failure(body.message.clone(), body)
    };

    Ok(HttpResponse::Ok().json(envelope.with_request_id(request_id.to_string())))
}
