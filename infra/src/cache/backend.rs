//! Configured verification cache backend

use async_trait::async_trait;
use std::time::Duration;

use pv_core::services::VerificationCacheTrait;
use pv_shared::{CacheStrategyConfig, CacheType};

use crate::cache::{MemoryVerificationCache, RedisClient, RedisVerificationCache};
use crate::InfrastructureError;

/// Verification cache selected by `CacheStrategyConfig`
///
/// `Disabled` never holds anything, so every lookup falls through to the
/// database tier.
pub enum VerificationCache {
    Redis(RedisVerificationCache),
    Memory(MemoryVerificationCache),
    Disabled,
}

impl VerificationCache {
    /// Build the backend described by `config`
    ///
    /// Returns the Redis client too when one was opened, so it can be shared
    /// with the statistics store.
    pub async fn from_config(
        config: &CacheStrategyConfig,
    ) -> Result<(Self, Option<RedisClient>), InfrastructureError> {
        if !config.enabled {
            tracing::info!("Verification cache disabled");
            return Ok((VerificationCache::Disabled, None));
        }

        match config.cache_type {
            CacheType::Redis => {
                let redis_config = config.redis.as_ref().ok_or_else(|| {
                    InfrastructureError::Config(
                        "cache_type is redis but no redis settings were given".to_string(),
                    )
                })?;
                let client = RedisClient::new(redis_config).await?;
                tracing::info!("Using Redis verification cache");
                Ok((
                    VerificationCache::Redis(RedisVerificationCache::new(client.clone())),
                    Some(client),
                ))
            }
            CacheType::Memory => {
                let memory_config = config.memory.clone().unwrap_or_default();
                tracing::info!(
                    max_entries = memory_config.max_entries,
                    "Using process-local verification cache"
                );
                Ok((
                    VerificationCache::Memory(MemoryVerificationCache::new(&memory_config)),
                    None,
                ))
            }
        }
    }

    /// Backend name for logs and health reports
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationCache::Redis(_) => "redis",
            VerificationCache::Memory(_) => "memory",
            VerificationCache::Disabled => "disabled",
        }
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        match self {
            VerificationCache::Redis(cache) => cache.health_check().await,
            VerificationCache::Memory(_) | VerificationCache::Disabled => Ok(true),
        }
    }
}

#[async_trait]
impl VerificationCacheTrait for VerificationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            VerificationCache::Redis(cache) => cache.get(key).await,
            VerificationCache::Memory(cache) => cache.get(key).await,
            VerificationCache::Disabled => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), String> {
        match self {
            VerificationCache::Redis(cache) => cache.set(key, payload, ttl).await,
            VerificationCache::Memory(cache) => cache.set(key, payload, ttl).await,
            VerificationCache::Disabled => Ok(()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        match self {
            VerificationCache::Redis(cache) => cache.delete(key).await,
            VerificationCache::Memory(cache) => cache.delete(key).await,
            VerificationCache::Disabled => Ok(false),
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        match self {
            VerificationCache::Redis(cache) => cache.keys(prefix).await,
            VerificationCache::Memory(cache) => cache.keys(prefix).await,
            VerificationCache::Disabled => Ok(Vec::new()),
        }
    }
}
