use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_shared::{HealthResponse, HealthStatus};

use super::AppState;

/// Handler for GET /health
///
/// Probes every registered backing service. Responds 503 when any of them
/// is unhealthy so load balancers can take the instance out of rotation.
pub async fn health_check<P, R, C, L, T>(state: web::Data<AppState<P, R, C, L, T>>) -> HttpResponse
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    let mut services = HashMap::with_capacity(state.probes.len());
    for (name, probe) in &state.probes {
        services.insert(name.clone(), probe.probe().await);
    }

    let response = HealthResponse::from_services(services, state.version.clone());
    match response.status {
        HealthStatus::Unhealthy => {
            tracing::warn!(event = "health_unhealthy", "Health check found an unhealthy service");
            HttpResponse::ServiceUnavailable().json(response)
        }
        _ => HttpResponse::Ok().json(response),
    }
}
