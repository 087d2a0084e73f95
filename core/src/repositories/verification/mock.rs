//! Mock implementation of VerificationRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification::VerificationRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::VerificationRepository;

/// Mock verification repository for testing
pub struct MockVerificationRepository {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
    next_id: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub upserts: AtomicUsize,
}

impl MockVerificationRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            upserts: AtomicUsize::new(0),
        }
    }

    /// Place a record directly, bypassing upsert bookkeeping
    pub async fn seed(&self, record: VerificationRecord) {
        self.records
            .write()
            .await
            .insert(record.number.clone(), record);
    }

    pub async fn get(&self, number: &str) -> Option<VerificationRecord> {
        self.records.read().await.get(number).cloned()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

impl Default for MockVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn find_latest(&self, number: &str) -> DomainResult<Option<VerificationRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::storage("verification table unavailable"));
        }
        Ok(self.records.read().await.get(number).cloned())
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<VerificationRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage("verification table is read-only"));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.write().await;
        let mut stored = record.clone();
        match records.get(&record.number) {
            Some(existing) => {
                stored.id = existing.id;
                stored.updated_at = Utc::now();
            }
            None => {
                stored.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
            }
        }
        records.insert(stored.number.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_by_number(&self, number: &str) -> DomainResult<u64> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage("verification table is read-only"));
        }
        Ok(self.records.write().await.remove(number).map_or(0, |_| 1))
    }

    async fn exists(&self, number: &str) -> DomainResult<bool> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::storage("verification table unavailable"));
        }
        Ok(self.records.read().await.contains_key(number))
    }
}
