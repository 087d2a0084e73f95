//! In-memory prefix table

use async_trait::async_trait;
use tokio::sync::RwLock;

use pv_core::domain::entities::PrefixRecord;
use pv_core::errors::DomainResult;
use pv_core::repositories::PrefixRepository;

/// Prefix table held in memory, kept sorted by prefix
#[derive(Default)]
pub struct InMemoryPrefixRepository {
    records: RwLock<Vec<PrefixRecord>>,
}

impl InMemoryPrefixRepository {
    pub fn new(records: impl IntoIterator<Item = PrefixRecord>) -> Self {
        let mut records: Vec<PrefixRecord> = records.into_iter().collect();
        records.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        Self {
            records: RwLock::new(records),
        }
    }

    /// Add a row; duplicates are kept, as a table without a unique key would
    pub async fn insert(&self, record: PrefixRecord) {
        let mut records = self.records.write().await;
        let at = records.partition_point(|r| r.prefix <= record.prefix);
        records.insert(at, record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl PrefixRepository for InMemoryPrefixRepository {
    async fn find_by_prefix(&self, prefix: &str) -> DomainResult<Vec<PrefixRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.prefix == prefix)
            .cloned()
            .collect())
    }

    async fn find_starting_with(&self, digits: &str) -> DomainResult<Vec<PrefixRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.prefix.starts_with(digits))
            .cloned()
            .collect())
    }
}
