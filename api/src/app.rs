//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_shared::errors::error_codes;
use pv_shared::ApiResponse;

use crate::handlers::json_error_handler;
use crate::routes::health::health_check;
use crate::routes::maintenance::{clear_cache, delete_verification};
use crate::routes::prefix::check_prefix;
use crate::routes::verify::{verify_batch, verify_phone};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
///
/// `max_payload_size` caps JSON bodies, which matters for batch uploads.
pub fn create_app<P, R, C, L, T>(
    app_state: web::Data<AppState<P, R, C, L, T>>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Request spans with a generated request id
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<P, R, C, L, T>))
        .service(
            web::scope("/api/v1")
                .route("/prefix/check", web::post().to(check_prefix::<P, R, C, L, T>))
                .route("/verify", web::post().to(verify_phone::<P, R, C, L, T>))
                .route("/verify/batch", web::post().to(verify_batch::<P, R, C, L, T>))
                .route(
                    "/verifications/{number}",
                    web::delete().to(delete_verification::<P, R, C, L, T>),
                )
                .route("/cache/clear", web::post().to(clear_cache::<P, R, C, L, T>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
        "{}: The requested resource was not found",
        error_codes::NOT_FOUND
    )))
}
