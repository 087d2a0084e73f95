//! Prefix repository trait defining read access to the network prefix table.

use async_trait::async_trait;

use crate::domain::entities::prefix::PrefixRecord;
use crate::errors::DomainResult;

/// Read-only access to the prefix table
///
/// Both queries return every matching row so the resolver can detect
/// duplicates; implementations must not deduplicate.
#[async_trait]
pub trait PrefixRepository: Send + Sync {
    /// All rows whose prefix equals `prefix` exactly
    async fn find_by_prefix(&self, prefix: &str) -> DomainResult<Vec<PrefixRecord>>;

    /// All rows whose prefix starts with `digits`, ordered by prefix ascending
    async fn find_starting_with(&self, digits: &str) -> DomainResult<Vec<PrefixRecord>>;
}
