//! Verification repository trait defining persistence of carrier lookups.

use async_trait::async_trait;

use crate::domain::entities::verification::VerificationRecord;
use crate::errors::DomainResult;

/// Repository trait for stored verification results
///
/// Records are keyed by cleaned number. Writes are upserts; when the table
/// holds several rows for a number, reads return the newest by `created_at`.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Newest stored record for a number
    async fn find_latest(&self, number: &str) -> DomainResult<Option<VerificationRecord>>;

    /// Insert or update the record for `record.number`
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The stored record with its id populated
    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<VerificationRecord>;

    /// Delete every row for a number, returning how many were removed
    async fn delete_by_number(&self, number: &str) -> DomainResult<u64>;

    /// Whether any row exists for a number
    async fn exists(&self, number: &str) -> DomainResult<bool>;
}
