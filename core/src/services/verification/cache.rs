//! Typed access to the verification cache

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::verification::VerificationRecord;
use crate::domain::value_objects::cache_key::{cache_key, CACHE_KEY_PREFIX};

use super::traits::VerificationCacheTrait;

/// Serializes records into the `phone_verification_` namespace of a
/// [`VerificationCacheTrait`] backend
pub struct RecordCache<C: VerificationCacheTrait> {
    backend: Arc<C>,
    ttl: Duration,
}

impl<C: VerificationCacheTrait> Clone for RecordCache<C> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ttl: self.ttl,
        }
    }
}

impl<C: VerificationCacheTrait> RecordCache<C> {
    pub fn new(backend: Arc<C>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Cached record for a cleaned number; malformed payloads are errors
    pub async fn read(&self, number: &str) -> Result<Option<VerificationRecord>, String> {
        self.read_key(&cache_key(number)).await
    }

    pub async fn read_key(&self, key: &str) -> Result<Option<VerificationRecord>, String> {
        match self.backend.get(key).await? {
            Some(payload) => VerificationRecord::from_cache_payload(&payload)
                .map(Some)
                .map_err(|e| format!("Malformed cache entry {}: {}", key, e)),
            None => Ok(None),
        }
    }

    /// Store a record, restarting its expiry
    pub async fn write(&self, record: &VerificationRecord) -> Result<(), String> {
        let payload = record
            .to_cache_payload()
            .map_err(|e| format!("Failed to serialize cache entry: {}", e))?;
        self.backend
            .set(&cache_key(&record.number), &payload, self.ttl)
            .await
    }

    pub async fn evict(&self, number: &str) -> Result<bool, String> {
        self.backend.delete(&cache_key(number)).await
    }

    pub async fn evict_key(&self, key: &str) -> Result<bool, String> {
        self.backend.delete(key).await
    }

    /// Every key currently in the namespace
    pub async fn keys(&self) -> Result<Vec<String>, String> {
        self.backend.keys(CACHE_KEY_PREFIX).await
    }
}
