mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use pv_api::create_app;
use pv_core::{cache_key, VerificationCacheTrait, VerificationRepository};
use pv_infra::health::HealthProbe;
use pv_shared::ServiceHealth;

use common::{test_context, FixedProbe, CELLCARD};

const PAYLOAD_LIMIT: usize = 1024 * 1024;

fn verify_request(number: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/verify")
        .set_json(json!({ "phone_number": number }))
}

fn clear_request(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/cache/clear").set_json(body)
}

#[actix_web::test]
async fn test_delete_removes_record_and_cache_entry() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let resp = test::call_service(&app, verify_request(CELLCARD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.cache.get(&cache_key(CELLCARD)).await.unwrap().is_some());

    let req = test::TestRequest::delete()
        .uri("/api/v1/verifications/855-92-313-242")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["phone_number"], CELLCARD);
    assert_eq!(body["data"]["deleted"], 1);
    assert_eq!(
        body["data"]["message"],
        "Verification record and cache deleted successfully"
    );
    assert!(!ctx.repository.exists(CELLCARD).await.unwrap());
    assert!(ctx.cache.get(&cache_key(CELLCARD)).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_delete_unknown_number_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/verifications/{}", CELLCARD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to delete verification record");
}

#[actix_web::test]
async fn test_clear_single_falls_back_to_database() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;
    test::call_service(&app, verify_request(CELLCARD).to_request()).await;

    let resp = test::call_service(
        &app,
        clear_request(json!({ "action_type": "single", "phone_number": CELLCARD })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["cleared"], 1);
    assert_eq!(body["data"]["message"], "Cache cleared for phone number");

    let body: Value =
        test::read_body_json(test::call_service(&app, verify_request(CELLCARD).to_request()).await).await;
    assert_eq!(body["data"]["source"], "database");
    assert_eq!(ctx.carrier.call_count(), 1);
}

#[actix_web::test]
async fn test_clear_single_requires_number() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let resp = test::call_service(&app, clear_request(json!({})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone number is required");
}

#[actix_web::test]
async fn test_clear_all_empties_namespace() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;
    test::call_service(&app, verify_request(CELLCARD).to_request()).await;
    test::call_service(&app, verify_request("85512345678").to_request()).await;

    let resp = test::call_service(&app, clear_request(json!({ "action_type": "all" })).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["action_type"], "all");
    assert_eq!(body["data"]["cleared"], 2);
    assert_eq!(body["data"]["message"], "Cleared cache for 2 verification records");
    assert!(ctx.cache.keys("").await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_clear_orphaned_keeps_entries_with_records() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;
    test::call_service(&app, verify_request(CELLCARD).to_request()).await;
    test::call_service(&app, verify_request("85512345678").to_request()).await;

    // Record removed behind the cache's back
    ctx.repository.delete_by_number("85512345678").await.unwrap();

    let resp = test::call_service(&app, clear_request(json!({ "action_type": "orphaned" })).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["cleared"], 1);
    assert_eq!(body["data"]["message"], "Cleared 1 orphaned cache entries");
    assert!(ctx.cache.get(&cache_key(CELLCARD)).await.unwrap().is_some());
    assert!(ctx.cache.get(&cache_key("85512345678")).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_clear_rejects_unknown_action() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let resp = test::call_service(&app, clear_request(json!({ "action_type": "everything" })).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_reports_memory_cache_healthy() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["cache"]["status"], "healthy");
}

#[actix_web::test]
async fn test_health_unavailable_when_a_probe_fails() {
    let ctx = test_context();
    let state = Arc::try_unwrap(ctx.state.into_inner())
        .ok()
        .expect("state has a single owner");
    let database: Arc<dyn HealthProbe> =
        Arc::new(FixedProbe(ServiceHealth::unhealthy("connection refused")));
    let state = state.with_probe("database", database);
    let app = test::init_service(create_app(web::Data::new(state), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["message"], "connection refused");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), PAYLOAD_LIMIT)).await;

    let req = test::TestRequest::get().uri("/api/v1/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
