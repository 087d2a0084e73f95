//! Record and cache maintenance operations

use pv_shared::utils::phone::{clean_number, mask_phone_number};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::prefix::PrefixRepository;
use crate::repositories::verification::VerificationRepository;

use super::service::VerificationService;
use super::traits::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};

impl<P, R, C, L, T> VerificationService<P, R, C, L, T>
where
    P: PrefixRepository + 'static,
    R: VerificationRepository + 'static,
    C: VerificationCacheTrait + 'static,
    L: CarrierLookupTrait + 'static,
    T: StatsStoreTrait + 'static,
{
    /// Delete every stored verification for a number along with its cache
    /// entry, returning the number of rows removed.
    ///
    /// A failed cache eviction is an error even though the rows are gone,
    /// since the stale entry would keep serving the deleted result.
    pub async fn delete_verification(&self, raw: &str) -> DomainResult<u64> {
        let number = require_number(raw)?;

        let deleted = self.repository.delete_by_number(&number).await?;
        if let Err(e) = self.cache.evict(&number).await {
            tracing::error!(
                number = %mask_phone_number(&number),
                deleted = deleted,
                error = %e,
                event = "cache_evict_failed",
                "Verification deleted but cache entry could not be removed"
            );
            return Err(DomainError::storage(format!(
                "Deleted {} stored verification(s) but the cache entry remains: {}",
                deleted, e
            )));
        }

        tracing::info!(
            number = %mask_phone_number(&number),
            deleted = deleted,
            event = "verification_deleted",
            "Deleted stored verification"
        );
        Ok(deleted)
    }

    /// Remove the cache entry for one number
    pub async fn clear_cached(&self, raw: &str) -> DomainResult<bool> {
        let number = require_number(raw)?;
        self.cache.evict(&number).await.map_err(DomainError::storage)
    }

    /// Remove every verification cache entry, returning how many were removed
    pub async fn clear_all_cached(&self) -> DomainResult<usize> {
        let keys = self.cache.keys().await.map_err(DomainError::storage)?;

        let mut removed = 0;
        for key in &keys {
            if self.cache.evict_key(key).await.map_err(DomainError::storage)? {
                removed += 1;
            }
        }

        tracing::info!(removed = removed, event = "cache_cleared", "Cleared verification cache");
        Ok(removed)
    }

    /// Remove cache entries that are malformed or whose number no longer has
    /// a stored verification, returning how many were removed
    pub async fn sweep_orphaned_cache_entries(&self) -> DomainResult<usize> {
        let keys = self.cache.keys().await.map_err(DomainError::storage)?;

        let mut removed = 0;
        for key in &keys {
            let orphaned = match self.cache.read_key(key).await {
                Ok(Some(record)) => !self.repository.exists(&record.number).await?,
                // Expired between listing and reading
                Ok(None) => false,
                Err(e) => {
                    tracing::debug!(key = %key, error = %e, "Dropping malformed cache entry");
                    true
                }
            };

            if orphaned && self.cache.evict_key(key).await.map_err(DomainError::storage)? {
                removed += 1;
            }
        }

        tracing::info!(
            scanned = keys.len(),
            removed = removed,
            event = "cache_swept",
            "Removed orphaned cache entries"
        );
        Ok(removed)
    }
}

fn require_number(raw: &str) -> DomainResult<String> {
    let number = clean_number(raw);
    if number.is_empty() {
        return Err(DomainError::validation("Invalid phone number format"));
    }
    Ok(number)
}
