//! Redis-backed statistics counters

use async_trait::async_trait;
use std::time::Duration;

use pv_core::services::StatsStoreTrait;

use crate::cache::RedisClient;

/// Counters stored with INCRBY; each key expires `retention` after the
/// increment that created it
#[derive(Clone)]
pub struct RedisStatsStore {
    redis_client: RedisClient,
    retention: Duration,
}

impl RedisStatsStore {
    pub fn new(redis_client: RedisClient, retention: Duration) -> Self {
        Self {
            redis_client,
            retention,
        }
    }
}

#[async_trait]
impl StatsStoreTrait for RedisStatsStore {
    async fn increment(&self, key: &str, by: u64) -> Result<u64, String> {
        let expiry = self.retention.as_secs().max(1);
        self.redis_client
            .increment_by(key, by, Some(expiry))
            .await
            .map_err(|e| e.to_string())
    }
}
