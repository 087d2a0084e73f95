//! Main verification service implementation

use std::sync::Arc;

use pv_shared::utils::phone::{clean_number, mask_phone_number};

use crate::domain::entities::prefix::PrefixRecord;
use crate::domain::value_objects::freshness::FreshnessPreference;
use crate::errors::{DomainResult, FailureReason};
use crate::repositories::prefix::PrefixRepository;
use crate::repositories::verification::VerificationRepository;
use crate::services::freshness;
use crate::services::prefix_resolver::{PrefixResolver, Resolution};

use super::cache::RecordCache;
use super::carrier::CarrierReply;
use super::config::VerificationServiceConfig;
use super::pacer::Pacer;
use super::sources::{CacheSource, DatabaseSource, RecordSource, SourceAnswer};
use super::stats::{StatsRecorder, Tier};
use super::traits::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use super::types::{
    BatchResult, BatchStatistics, CancellationFlag, Source, VerificationFailure,
    VerificationOutcome, API_FAILURE_STATUS,
};

/// Verification orchestrator
///
/// Resolves the prefix, short-circuits numbers without live coverage, then
/// walks the stored-result chain (cache, then database) before paying for a
/// carrier lookup. Successful lookups are persisted and cached.
pub struct VerificationService<P, R, C, L, T>
where
    P: PrefixRepository,
    R: VerificationRepository,
    C: VerificationCacheTrait,
    L: CarrierLookupTrait,
    T: StatsStoreTrait,
{
    /// Prefix resolver over the prefix table
    pub(super) resolver: PrefixResolver<P>,
    /// Durable verification store
    pub(super) repository: Arc<R>,
    /// Verification cache
    pub(super) cache: RecordCache<C>,
    /// Remote carrier lookup
    carrier: Arc<L>,
    /// Statistics counters
    stats: StatsRecorder<T>,
    /// Stored-result tiers, in lookup order
    sources: Vec<Box<dyn RecordSource>>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<P, R, C, L, T> VerificationService<P, R, C, L, T>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `prefixes` - Prefix table
    /// * `repository` - Stored verifications
    /// * `cache` - Verification cache backend
    /// * `carrier` - Carrier lookup client
    /// * `stats` - Statistics counter store
    /// * `config` - Service configuration
    pub fn new(
        prefixes: Arc<P>,
        repository: Arc<R>,
        cache: Arc<C>,
        carrier: Arc<L>,
        stats: Arc<T>,
        config: VerificationServiceConfig,
    ) -> Self {
        let cache = RecordCache::new(cache, config.cache_ttl);
        let sources: Vec<Box<dyn RecordSource>> = vec![
            Box::new(CacheSource::new(cache.clone())),
            Box::new(DatabaseSource::new(Arc::clone(&repository), cache.clone())),
        ];

        Self {
            resolver: PrefixResolver::new(prefixes),
            repository,
            cache,
            carrier,
            stats: StatsRecorder::new(stats),
            sources,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Resolve a number against the prefix table without verifying it
    pub async fn check_prefix(&self, raw: &str) -> DomainResult<Resolution> {
        self.resolver.resolve(raw).await
    }

    /// Verify a single phone number
    ///
    /// Never fails as a call: every problem is reported as a
    /// [`VerificationOutcome::Failed`] with a machine-readable reason.
    pub async fn verify(&self, raw: &str, preference: FreshnessPreference) -> VerificationOutcome {
        let (outcome, tier) = self.run(raw, preference, None).await;
        self.stats.record_single(&outcome, tier).await;
        outcome
    }

    /// Verify numbers in order, one outcome per input
    pub async fn verify_batch<S>(&self, raws: &[S], preference: FreshnessPreference) -> BatchResult
    where
        S: AsRef<str> + Sync,
    {
        self.verify_batch_with_cancel(raws, preference, &CancellationFlag::new())
            .await
    }

    /// Verify numbers in order, stopping between items once `cancel` is set
    ///
    /// Inputs not processed before cancellation are reported as
    /// `cancelled` failures, so the outcome count always equals the input
    /// count.
    pub async fn verify_batch_with_cancel<S>(
        &self,
        raws: &[S],
        preference: FreshnessPreference,
        cancel: &CancellationFlag,
    ) -> BatchResult
    where
        S: AsRef<str> + Sync,
    {
        let mut pacer = Pacer::new(self.config.batch_pacing);
        let mut statistics = BatchStatistics {
            total_numbers: raws.len(),
            ..Default::default()
        };
        let mut outcomes = Vec::with_capacity(raws.len());

        tracing::info!(
            total = raws.len(),
            freshness = %preference,
            event = "batch_started",
            "Starting batch verification"
        );

        for raw in raws {
            let raw = raw.as_ref();
            if cancel.is_cancelled() {
                outcomes.push(
                    VerificationFailure::new(
                        clean_number(raw),
                        FailureReason::Cancelled,
                        "Batch cancelled before this number was processed",
                    )
                    .into(),
                );
                continue;
            }

            let (outcome, tier) = self.run(raw, preference, Some(&mut pacer)).await;
            match tier {
                Tier::Cache => statistics.cache_hits += 1,
                Tier::Database => statistics.database_hits += 1,
                Tier::Api => statistics.api_calls += 1,
                Tier::None => {}
            }
            if outcome.is_skipped() {
                statistics.skipped_no_coverage += 1;
            }
            outcomes.push(outcome);
        }

        self.stats.record_batch(&statistics).await;

        tracing::info!(
            total = statistics.total_numbers,
            cache_hits = statistics.cache_hits,
            database_hits = statistics.database_hits,
            api_calls = statistics.api_calls,
            skipped = statistics.skipped_no_coverage,
            cancelled = cancel.is_cancelled(),
            event = "batch_completed",
            "Batch verification finished"
        );

        BatchResult {
            outcomes,
            statistics,
        }
    }

    async fn run(
        &self,
        raw: &str,
        preference: FreshnessPreference,
        pacer: Option<&mut Pacer>,
    ) -> (VerificationOutcome, Tier) {
        let cleaned = clean_number(raw);
        if cleaned.is_empty() {
            let failure = VerificationFailure::new(
                raw.trim(),
                FailureReason::InvalidInput,
                "Invalid phone number format",
            );
            return (failure.into(), Tier::None);
        }

        let prefix = match self.resolver.resolve(&cleaned).await {
            Ok(Resolution::Resolved { prefix_record, .. }) => prefix_record,
            Ok(other) => {
                tracing::debug!(
                    number = %mask_phone_number(&cleaned),
                    reason = %other.message(),
                    "Number rejected by prefix check"
                );
                return (VerificationFailure::from_resolution(other).into(), Tier::None);
            }
            Err(e) => {
                return (
                    VerificationFailure::from_domain_error(cleaned, &e).into(),
                    Tier::None,
                );
            }
        };

        if !prefix.live_coverage {
            tracing::info!(
                number = %mask_phone_number(&cleaned),
                prefix = %prefix.prefix,
                event = "verification_skipped",
                "Skipping API call for number without live coverage"
            );
            return (VerificationOutcome::skipped(cleaned, prefix), Tier::None);
        }

        if !freshness::should_force_fresh(preference) {
            for source in &self.sources {
                if let SourceAnswer::Hit(record) = source.fetch(&cleaned, preference).await {
                    let source = source.source();
                    let outcome = VerificationOutcome::Verified {
                        record,
                        prefix: Some(prefix),
                        source,
                    };
                    return (outcome, Tier::from(source));
                }
            }
        }

        if let Some(pacer) = pacer {
            pacer.wait().await;
        }
        (self.lookup_and_store(cleaned, prefix).await, Tier::Api)
    }

    async fn lookup_and_store(&self, number: String, prefix: PrefixRecord) -> VerificationOutcome {
        tracing::info!(
            number = %mask_phone_number(&number),
            prefix = %prefix.prefix,
            event = "carrier_lookup",
            "Requesting carrier lookup"
        );

        let lookup = match self.carrier.lookup(&number).await {
            Ok(CarrierReply::Success(lookup)) => lookup,
            Ok(CarrierReply::Rejected {
                status,
                status_message,
                error,
            }) => {
                tracing::warn!(
                    number = %mask_phone_number(&number),
                    status = status,
                    carrier_error = error,
                    event = "carrier_rejected",
                    "Carrier rejected lookup"
                );
                let mut failure = VerificationFailure::new(
                    number,
                    FailureReason::LookupFailed,
                    format!("Carrier lookup failed: {}", status_message),
                );
                failure.status = Some(status);
                failure.status_message = Some(status_message);
                return failure.into();
            }
            Err(e) => {
                let reason = e.failure_reason();
                tracing::error!(
                    number = %mask_phone_number(&number),
                    error = %e,
                    reason = %reason,
                    event = "carrier_lookup_failed",
                    "Carrier lookup failed"
                );
                let mut failure = VerificationFailure::new(number, reason, e.to_string());
                failure.status = Some(API_FAILURE_STATUS);
                failure.status_message = reason.status_message().map(str::to_string);
                return failure.into();
            }
        };

        let record = lookup.into_record(&number, &prefix);
        let stored = match self.repository.upsert(&record).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(
                    number = %mask_phone_number(&number),
                    error = %e,
                    event = "verification_save_failed",
                    "Failed to save verification result"
                );
                record
            }
        };

        if let Err(e) = self.cache.write(&stored).await {
            tracing::warn!(
                number = %mask_phone_number(&number),
                error = %e,
                event = "cache_write_failed",
                "Failed to cache verification result"
            );
        }

        tracing::info!(
            number = %mask_phone_number(&number),
            network = stored.network.as_deref().unwrap_or_default(),
            event = "verification_completed",
            "Verification result saved and cached"
        );

        VerificationOutcome::Verified {
            record: stored,
            prefix: Some(prefix),
            source: Source::Api,
        }
    }
}
