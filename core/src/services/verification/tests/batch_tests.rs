//! Unit tests for batch verification

use std::time::Duration;
use tokio::time::Instant;

use crate::domain::value_objects::freshness::FreshnessPreference;
use crate::errors::FailureReason;
use crate::services::verification::{CancellationFlag, Source, VerificationServiceConfig};

use super::mocks::Harness;

#[tokio::test(start_paused = true)]
async fn test_batch_preserves_order_and_partial_failure() {
    let h = Harness::new();
    let inputs = ["85592313242", "not a number", "85512345678"];

    let result = h.service.verify_batch(&inputs, FreshnessPreference::Unspecified).await;

    assert_eq!(result.len(), 3);
    assert_eq!(result.outcomes[0].number(), "85592313242");
    assert!(result.outcomes[0].is_verified());
    assert_eq!(result.outcomes[1].failure_reason(), Some(FailureReason::InvalidInput));
    assert_eq!(result.outcomes[2].number(), "85512345678");
    assert!(result.outcomes[2].is_verified());

    assert_eq!(result.verified().count(), 2);
    assert_eq!(result.failed().count(), 1);
    assert_eq!(result.skipped().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_batch_statistics_per_tier() {
    let h = Harness::new();
    // Warm the cache for one number
    h.service.verify("85592313242", FreshnessPreference::Unspecified).await;

    let inputs = vec![
        "85592313242".to_string(),
        "85510234567".to_string(),
        "85512345678".to_string(),
        "8559231".to_string(),
    ];
    let result = h.service.verify_batch(&inputs, FreshnessPreference::Unspecified).await;

    let stats = &result.statistics;
    assert_eq!(stats.total_numbers, 4);
    assert_eq!(stats.cache_hits, 1);
    assert_eq!(stats.database_hits, 0);
    assert_eq!(stats.api_calls, 1);
    assert_eq!(stats.skipped_no_coverage, 1);

    assert_eq!(result.outcomes[0].source(), Some(Source::Cache));
    assert_eq!(result.outcomes[1].source(), Some(Source::PrefixCheck));
    assert_eq!(result.outcomes[3].failure_reason(), Some(FailureReason::PartialMatch));

    assert_eq!(h.stats.get("batch_total"), 1);
    assert_eq!(h.stats.get("batch_numbers"), 4);
    // One from the warm-up call, one from the batch
    assert_eq!(h.stats.get("api_calls"), 2);
    assert_eq!(h.stats.get("skipped_no_coverage"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_batch_paces_api_bound_items() {
    let h = Harness::with_config(VerificationServiceConfig {
        batch_pacing: Duration::from_millis(100),
        ..Default::default()
    });
    let inputs = ["85592313242", "85592313243", "85592313244"];
    let start = Instant::now();

    let result = h.service.verify_batch(&inputs, FreshnessPreference::Unspecified).await;

    assert_eq!(result.statistics.api_calls, 3);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_batch_does_not_pace_stored_hits() {
    let h = Harness::new();
    h.service.verify("85592313242", FreshnessPreference::Unspecified).await;
    let inputs = ["85592313242", "85592313242", "85510234567", "abc"];
    let start = Instant::now();

    let result = h.service.verify_batch(&inputs, FreshnessPreference::Unspecified).await;

    assert_eq!(result.statistics.cache_hits, 2);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_batch_always_fresh_calls_api_for_every_covered_number() {
    let h = Harness::new();
    h.service.verify("85592313242", FreshnessPreference::Unspecified).await;

    let result = h
        .service
        .verify_batch(&["85592313242", "85512345678"], FreshnessPreference::AlwaysFresh)
        .await;

    assert_eq!(result.statistics.api_calls, 2);
    assert_eq!(result.statistics.cache_hits, 0);
    assert_eq!(h.carrier.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_batch_reports_every_input() {
    let h = Harness::new();
    let cancel = CancellationFlag::new();
    cancel.cancel();
    let inputs = ["85592313242", "85512345678"];

    let result = h
        .service
        .verify_batch_with_cancel(&inputs, FreshnessPreference::Unspecified, &cancel)
        .await;

    assert_eq!(result.len(), 2);
    assert!(result
        .outcomes
        .iter()
        .all(|o| o.failure_reason() == Some(FailureReason::Cancelled)));
    assert_eq!(result.statistics.total_numbers, 2);
    assert_eq!(h.carrier.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_batch() {
    let h = Harness::new();
    let inputs: Vec<String> = Vec::new();

    let result = h.service.verify_batch(&inputs, FreshnessPreference::Unspecified).await;

    assert!(result.is_empty());
    assert_eq!(result.statistics.total_numbers, 0);
    assert_eq!(h.stats.get("batch_total"), 1);
}
