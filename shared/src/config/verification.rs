//! Verification tuning knobs

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationSettings {
    /// Lifetime of a cached verification in seconds
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,

    /// Minimum gap between consecutive carrier calls inside a batch
    #[serde(default = "default_batch_pacing_ms")]
    pub batch_pacing_ms: u64,

    /// Lifetime of statistics counters in days
    #[serde(default = "default_stats_ttl_days")]
    pub stats_ttl_days: u64,

    /// Largest batch accepted over HTTP
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: default_cache_ttl_seconds(),
            batch_pacing_ms: default_batch_pacing_ms(),
            stats_ttl_days: default_stats_ttl_days(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl VerificationSettings {
    /// Create from environment variables
    pub fn from_env() -> Self {
        fn parsed<T: std::str::FromStr>(name: &str, fallback: T) -> T {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        }

        let defaults = Self::default();
        Self {
            cache_ttl_seconds: parsed("VERIFICATION_CACHE_TTL", defaults.cache_ttl_seconds),
            batch_pacing_ms: parsed("VERIFICATION_BATCH_PACING_MS", defaults.batch_pacing_ms),
            stats_ttl_days: parsed("VERIFICATION_STATS_TTL_DAYS", defaults.stats_ttl_days),
            max_batch_size: parsed("VERIFICATION_MAX_BATCH_SIZE", defaults.max_batch_size),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn batch_pacing(&self) -> Duration {
        Duration::from_millis(self.batch_pacing_ms)
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_days * 24 * 60 * 60)
    }
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

fn default_batch_pacing_ms() -> u64 {
    100
}

fn default_stats_ttl_days() -> u64 {
    30
}

fn default_max_batch_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = VerificationSettings::default();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.batch_pacing(), Duration::from_millis(100));
        assert_eq!(settings.stats_ttl(), Duration::from_secs(30 * 86_400));
        assert_eq!(settings.max_batch_size, 1000);
    }
}
