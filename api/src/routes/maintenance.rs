use actix_web::{web, HttpResponse};
use tracing_actix_web::RequestId;

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_shared::phone::clean_number;
use pv_shared::ApiResponse;

use crate::dto::{ClearAction, ClearCacheRequest, ClearCacheResponse, DeleteVerificationResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for DELETE /api/v1/verifications/{number}
///
/// Removes every stored verification for the number and its cache entry.
/// 404 when nothing was stored.
pub async fn delete_verification<P, R, C, L, T>(
    request_id: RequestId,
    state: web::Data<AppState<P, R, C, L, T>>,
    number: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    let deleted = state.verification_service.delete_verification(&number).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Failed to delete verification record".to_string()));
    }

    let body = DeleteVerificationResponse {
        phone_number: clean_number(&number),
        deleted,
        message: "Verification record and cache deleted successfully".to_string(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(body).with_request_id(request_id.to_string())))
}

/// Handler for POST /api/v1/cache/clear
///
/// # Request Body
///
/// ```json
/// { "action_type": "single", "phone_number": "85592313242" }
/// ```
///
/// `all` empties the verification cache namespace; `orphaned` removes
/// entries whose number has no stored verification. `single` is the default
/// and needs `phone_number`.
pub async fn clear_cache<P, R, C, L, T>(
    request_id: RequestId,
    state: web::Data<AppState<P, R, C, L, T>>,
    request: web::Json<ClearCacheRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    let service = &state.verification_service;
    let body = match request.action_type {
        ClearAction::All => ClearCacheResponse::all(service.clear_all_cached().await?),
        ClearAction::Orphaned => {
            ClearCacheResponse::orphaned(service.sweep_orphaned_cache_entries().await?)
        }
        ClearAction::Single => {
            let number = request
                .phone_number
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| ApiError::Validation("Phone number is required".to_string()))?;
            ClearCacheResponse::single(service.clear_cached(number).await?)
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(body).with_request_id(request_id.to_string())))
}
