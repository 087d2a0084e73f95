//! Configuration for the verification service

use std::time::Duration;

use pv_shared::config::VerificationSettings;

/// Default lifetime of a cached verification
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default minimum gap between carrier calls inside a batch
pub const DEFAULT_BATCH_PACING: Duration = Duration::from_millis(100);

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Expiry applied to every cache write
    pub cache_ttl: Duration,
    /// Minimum spacing between API-bound batch items
    pub batch_pacing: Duration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            batch_pacing: DEFAULT_BATCH_PACING,
        }
    }
}

impl From<&VerificationSettings> for VerificationServiceConfig {
    fn from(settings: &VerificationSettings) -> Self {
        Self {
            cache_ttl: settings.cache_ttl(),
            batch_pacing: settings.batch_pacing(),
        }
    }
}
