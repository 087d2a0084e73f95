//! In-memory verification table

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use pv_core::domain::entities::VerificationRecord;
use pv_core::errors::DomainResult;
use pv_core::repositories::VerificationRepository;

/// Latest verification per number, held in memory
pub struct InMemoryVerificationRepository {
    records: RwLock<HashMap<String, VerificationRecord>>,
    next_id: AtomicU64,
}

impl InMemoryVerificationRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for InMemoryVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn find_latest(&self, number: &str) -> DomainResult<Option<VerificationRecord>> {
        Ok(self.records.read().await.get(number).cloned())
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<VerificationRecord> {
        let mut records = self.records.write().await;
        let mut stored = record.clone();
        stored.id = match records.get(&record.number).and_then(|existing| existing.id) {
            Some(id) => {
                stored.updated_at = Utc::now();
                Some(id)
            }
            None => Some(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        records.insert(stored.number.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_by_number(&self, number: &str) -> DomainResult<u64> {
        Ok(self.records.write().await.remove(number).map_or(0, |_| 1))
    }

    async fn exists(&self, number: &str) -> DomainResult<bool> {
        Ok(self.records.read().await.contains_key(number))
    }
}
