//! Verification orchestration
//!
//! This module provides the single and batch verification workflow:
//! - Prefix pre-check and live-coverage short circuit
//! - Cache and database tiers consulted in order, honouring freshness
//! - Paid carrier lookups with persistence and cache refresh
//! - Paced, cancellable batch runs with per-tier counters
//! - Cache and record maintenance

mod cache;
mod carrier;
mod config;
mod maintenance;
mod pacer;
mod service;
mod sources;
mod stats;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cache::RecordCache;
pub use carrier::{CarrierLookup, CarrierReply, UNKNOWN_STATUS_MESSAGE};
pub use config::{VerificationServiceConfig, DEFAULT_BATCH_PACING, DEFAULT_CACHE_TTL};
pub use pacer::Pacer;
pub use service::VerificationService;
pub use sources::{CacheSource, DatabaseSource, RecordSource, SourceAnswer};
pub use stats::{stats_key, STATS_KEY_PREFIX};
pub use traits::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
pub use types::{
    BatchResult, BatchStatistics, CancellationFlag, Source, VerificationFailure,
    VerificationOutcome, API_FAILURE_STATUS, SKIPPED_MESSAGE, SKIPPED_STATUS,
    SKIPPED_STATUS_MESSAGE, SKIP_REASON_NO_LIVE_COVERAGE,
};
