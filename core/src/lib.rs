//! # Phone Verification Core
//!
//! Domain layer for the phone verification service. This crate contains the
//! prefix and verification entities, the prefix resolver, the freshness
//! policy, repository interfaces and the verification orchestrator.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{PrefixRecord, Presence, VerificationRecord};
pub use domain::value_objects::{cache_key, FreshnessPreference, CACHE_KEY_PREFIX};
pub use errors::*;
pub use repositories::{PrefixRepository, VerificationRepository};
pub use services::{
    BatchResult, BatchStatistics, CancellationFlag, CarrierLookup, CarrierLookupTrait,
    CarrierReply, PrefixResolver, Resolution, Source, StatsStoreTrait, VerificationCacheTrait,
    VerificationFailure, VerificationOutcome, VerificationService, VerificationServiceConfig,
};
