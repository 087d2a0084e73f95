//! Ordered chain of stored-result sources consulted before the carrier API

use async_trait::async_trait;
use std::sync::Arc;

use pv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::verification::VerificationRecord;
use crate::domain::value_objects::freshness::FreshnessPreference;
use crate::repositories::verification::VerificationRepository;
use crate::services::freshness;

use super::cache::RecordCache;
use super::traits::VerificationCacheTrait;
use super::types::Source;

/// Answer from one source in the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceAnswer {
    /// A record fresh enough for the caller
    Hit(VerificationRecord),
    /// Nothing usable here; ask the next source
    PassThrough,
}

/// One tier of stored verification results
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Tier reported on outcomes served by this source
    fn source(&self) -> Source;

    /// Look for a record acceptable under `preference`; failures pass through
    async fn fetch(&self, number: &str, preference: FreshnessPreference) -> SourceAnswer;
}

/// Cache tier
pub struct CacheSource<C: VerificationCacheTrait> {
    cache: RecordCache<C>,
}

impl<C: VerificationCacheTrait> CacheSource<C> {
    pub fn new(cache: RecordCache<C>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<C: VerificationCacheTrait> RecordSource for CacheSource<C> {
    fn source(&self) -> Source {
        Source::Cache
    }

    async fn fetch(&self, number: &str, preference: FreshnessPreference) -> SourceAnswer {
        match self.cache.read(number).await {
            Ok(Some(record)) if freshness::is_acceptable(record.stored_at(), preference) => {
                tracing::debug!(number = %mask_phone_number(number), "Verification served from cache");
                SourceAnswer::Hit(record)
            }
            Ok(_) => SourceAnswer::PassThrough,
            Err(e) => {
                tracing::warn!(
                    number = %mask_phone_number(number),
                    error = %e,
                    event = "cache_read_failed",
                    "Ignoring unreadable cache entry"
                );
                SourceAnswer::PassThrough
            }
        }
    }
}

/// Database tier; hits are written back to the cache
pub struct DatabaseSource<R: VerificationRepository, C: VerificationCacheTrait> {
    repository: Arc<R>,
    cache: RecordCache<C>,
}

impl<R: VerificationRepository, C: VerificationCacheTrait> DatabaseSource<R, C> {
    pub fn new(repository: Arc<R>, cache: RecordCache<C>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl<R: VerificationRepository, C: VerificationCacheTrait> RecordSource for DatabaseSource<R, C> {
    fn source(&self) -> Source {
        Source::Database
    }

    async fn fetch(&self, number: &str, preference: FreshnessPreference) -> SourceAnswer {
        let record = match self.repository.find_latest(number).await {
            Ok(Some(record)) if freshness::is_acceptable(record.stored_at(), preference) => record,
            Ok(_) => return SourceAnswer::PassThrough,
            Err(e) => {
                tracing::warn!(
                    number = %mask_phone_number(number),
                    error = %e,
                    event = "database_read_failed",
                    "Stored verification unavailable, falling through"
                );
                return SourceAnswer::PassThrough;
            }
        };

        if let Err(e) = self.cache.write(&record).await {
            tracing::warn!(
                number = %mask_phone_number(number),
                error = %e,
                event = "cache_write_failed",
                "Failed to re-cache stored verification"
            );
        }
        tracing::debug!(number = %mask_phone_number(number), "Verification served from database");
        SourceAnswer::Hit(record)
    }
}
