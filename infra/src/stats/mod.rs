//! Statistics counter stores
//!
//! Counters live under `network_verification_stats:` keys. Redis counters
//! expire after the configured retention; in-memory counters live as long
//! as the process.

mod memory_stats;
mod redis_stats;

#[cfg(test)]
mod tests;

pub use memory_stats::MemoryStatsStore;
pub use redis_stats::RedisStatsStore;

use async_trait::async_trait;

use pv_core::services::StatsStoreTrait;

/// Statistics store matching the configured cache backend
pub enum StatsStore {
    Redis(RedisStatsStore),
    Memory(MemoryStatsStore),
}

#[async_trait]
impl StatsStoreTrait for StatsStore {
    async fn increment(&self, key: &str, by: u64) -> Result<u64, String> {
        match self {
            StatsStore::Redis(store) => store.increment(key, by).await,
            StatsStore::Memory(store) => store.increment(key, by).await,
        }
    }
}
