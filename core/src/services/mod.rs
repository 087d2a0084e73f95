//! Business services containing domain logic and use cases.

pub mod freshness;
pub mod prefix_resolver;
pub mod verification;

// Re-export commonly used types
pub use freshness::{is_acceptable, is_acceptable_at, should_force_fresh};
pub use prefix_resolver::{PrefixResolver, Resolution};
pub use verification::{
    BatchResult, BatchStatistics, CancellationFlag, CarrierLookup, CarrierLookupTrait,
    CarrierReply, Source, StatsStoreTrait, VerificationCacheTrait, VerificationFailure,
    VerificationOutcome, VerificationService, VerificationServiceConfig,
};
