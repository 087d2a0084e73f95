//! Wiring of the production infrastructure

use std::sync::Arc;

use pv_core::{VerificationService, VerificationServiceConfig};
use pv_shared::AppConfig;

use crate::cache::VerificationCache;
use crate::carrier::TmtCarrierClient;
use crate::database::{DatabasePool, MySqlPrefixRepository, MySqlVerificationRepository};
use crate::stats::{MemoryStatsStore, RedisStatsStore, StatsStore};
use crate::InfrastructureError;

/// Verification service over MySQL, the configured cache and the carrier API
pub type MySqlVerificationService = VerificationService<
    MySqlPrefixRepository,
    MySqlVerificationRepository,
    VerificationCache,
    TmtCarrierClient,
    StatsStore,
>;

/// Connected infrastructure services
pub struct Infrastructure {
    pub database: DatabasePool,
    pub prefixes: Arc<MySqlPrefixRepository>,
    pub verifications: Arc<MySqlVerificationRepository>,
    pub cache: Arc<VerificationCache>,
    pub carrier: Arc<TmtCarrierClient>,
    pub stats: Arc<StatsStore>,
}

impl Infrastructure {
    /// Build the verification service over these components
    pub fn verification_service(&self, config: VerificationServiceConfig) -> MySqlVerificationService {
        VerificationService::new(
            Arc::clone(&self.prefixes),
            Arc::clone(&self.verifications),
            Arc::clone(&self.cache),
            Arc::clone(&self.carrier),
            Arc::clone(&self.stats),
            config,
        )
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The MySQL connection pool and repositories
/// - The verification cache backend (Redis, process-local or disabled)
/// - The statistics store, sharing the Redis connection when there is one
/// - The carrier API client
pub async fn initialize(config: &AppConfig) -> Result<Infrastructure, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    let database = DatabasePool::new(&config.database).await?;
    let pool = database.get_pool().clone();

    let (cache, redis_client) = VerificationCache::from_config(&config.cache).await?;
    let stats = match redis_client {
        Some(client) => StatsStore::Redis(RedisStatsStore::new(
            client,
            config.verification.stats_ttl(),
        )),
        None => StatsStore::Memory(MemoryStatsStore::new()),
    };

    let carrier = TmtCarrierClient::new(config.carrier.clone())?;

    tracing::info!(cache = cache.kind(), "Infrastructure services initialized");

    Ok(Infrastructure {
        database,
        prefixes: Arc::new(MySqlPrefixRepository::new(pool.clone())),
        verifications: Arc::new(MySqlVerificationRepository::new(pool)),
        cache: Arc::new(cache),
        carrier: Arc::new(carrier),
        stats: Arc::new(stats),
    })
}
