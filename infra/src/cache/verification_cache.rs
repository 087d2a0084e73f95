//! Redis-backed verification cache
//!
//! Stores serialized verification records under
//! `phone_verification_<md5(number)>` keys with the configured expiry.
//! Key scans use SCAN with a `<prefix>*` pattern.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use pv_core::services::VerificationCacheTrait;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Verification cache stored in Redis
#[derive(Clone)]
pub struct RedisVerificationCache {
    redis_client: RedisClient,
}

impl RedisVerificationCache {
    /// Create a new Redis verification cache
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Ping the backing Redis server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.redis_client.health_check().await
    }

    /// Expiry in whole seconds; Redis rejects a zero expiry
    pub(crate) fn expiry_seconds(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }

    /// Glob pattern matching every key under `prefix`
    pub(crate) fn scan_pattern(prefix: &str) -> String {
        let mut pattern = String::with_capacity(prefix.len() + 1);
        for c in prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('*');
        pattern
    }
}

#[async_trait]
impl VerificationCacheTrait for RedisVerificationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.get(key).await.map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), String> {
        let expiry = Self::expiry_seconds(ttl);
        debug!(key, expiry, "Caching verification record");
        self.redis_client
            .set_with_expiry(key, payload, expiry)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.redis_client.delete(key).await.map_err(|e| e.to_string())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        self.redis_client
            .scan_keys(&Self::scan_pattern(prefix))
            .await
            .map_err(|e| e.to_string())
    }
}
