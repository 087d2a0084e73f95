//! Statistics counters for verification activity

use chrono::Utc;
use std::sync::Arc;

use super::traits::StatsStoreTrait;
use super::types::{BatchStatistics, Source, VerificationOutcome};

/// Namespace for every statistics key
pub const STATS_KEY_PREFIX: &str = "network_verification_stats:";

/// Tier that produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    /// Decided before any stored tier was consulted
    None,
    Cache,
    Database,
    /// The carrier API was called, whatever the result
    Api,
}

impl From<Source> for Tier {
    fn from(source: Source) -> Self {
        match source {
            Source::Cache => Tier::Cache,
            Source::Database => Tier::Database,
            Source::Api => Tier::Api,
            Source::PrefixCheck => Tier::None,
        }
    }
}

/// Full key for a counter name
pub fn stats_key(name: &str) -> String {
    format!("{}{}", STATS_KEY_PREFIX, name)
}

/// Records counters, logging and swallowing store failures
pub(crate) struct StatsRecorder<T: StatsStoreTrait> {
    store: Arc<T>,
}

impl<T: StatsStoreTrait> StatsRecorder<T> {
    pub(crate) fn new(store: Arc<T>) -> Self {
        Self { store }
    }

    pub(crate) async fn record_single(&self, outcome: &VerificationOutcome, tier: Tier) {
        self.bump("total", 1).await;

        let result = match outcome {
            VerificationOutcome::Verified { .. } => "successful",
            VerificationOutcome::Skipped { .. } => "skipped_no_coverage",
            VerificationOutcome::Failed(_) => "failed",
        };
        self.bump(result, 1).await;

        if !outcome.is_failed() {
            let today = format!("today:{}", Utc::now().format("%Y-%m-%d"));
            self.bump(&today, 1).await;
        }

        match tier {
            Tier::Cache => self.bump("cached_hits", 1).await,
            Tier::Database => self.bump("database_hits", 1).await,
            Tier::Api => self.bump("api_calls", 1).await,
            Tier::None => {}
        }
    }

    pub(crate) async fn record_batch(&self, statistics: &BatchStatistics) {
        self.bump("batch_total", 1).await;
        self.bump("batch_numbers", statistics.total_numbers as u64).await;
        self.bump("cached_hits", statistics.cache_hits as u64).await;
        self.bump("database_hits", statistics.database_hits as u64).await;
        self.bump("api_calls", statistics.api_calls as u64).await;
        self.bump("skipped_no_coverage", statistics.skipped_no_coverage as u64)
            .await;
    }

    async fn bump(&self, name: &str, by: u64) {
        if by == 0 {
            return;
        }
        let key = stats_key(name);
        if let Err(e) = self.store.increment(&key, by).await {
            tracing::warn!(key = %key, error = %e, event = "stats_update_failed", "Failed to update statistics");
        }
    }
}
