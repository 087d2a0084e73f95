//! Traits for cache, carrier and statistics integration

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::CarrierError;

use super::carrier::CarrierReply;

/// Key-value cache holding serialized verification records
#[async_trait]
pub trait VerificationCacheTrait: Send + Sync {
    /// Fetch a payload, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Store a payload with expiration
    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), String>;
    /// Remove a key, reporting whether it existed
    async fn delete(&self, key: &str) -> Result<bool, String>;
    /// List every live key starting with `prefix`
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, String>;
}

/// Remote carrier lookup
#[async_trait]
pub trait CarrierLookupTrait: Send + Sync {
    /// Look up a cleaned phone number
    async fn lookup(&self, number: &str) -> Result<CarrierReply, CarrierError>;
}

/// Counter store for verification statistics
#[async_trait]
pub trait StatsStoreTrait: Send + Sync {
    /// Atomically add `by` to `key`, returning the new value
    async fn increment(&self, key: &str, by: u64) -> Result<u64, String>;
}
