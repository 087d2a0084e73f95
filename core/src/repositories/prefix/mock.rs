//! Mock implementation of PrefixRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::prefix::PrefixRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::PrefixRepository;

/// Mock prefix repository backed by a vector, allowing duplicate prefixes
pub struct MockPrefixRepository {
    records: Arc<Mutex<Vec<PrefixRecord>>>,
    pub should_fail: AtomicBool,
    pub queries: AtomicUsize,
}

impl MockPrefixRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(false),
            queries: AtomicUsize::new(0),
        }
    }

    /// Repository seeded with the Cambodian prefixes used across tests
    pub fn cambodia() -> Self {
        let repo = Self::new();
        repo.insert(Self::record("85592", 11, 11, "Cellcard", "01", true));
        repo.insert(Self::record("85510", 11, 11, "KH Smart Mobile", "02", false));
        repo.insert(Self::record("85512", 11, 12, "Cellcard", "01", true));
        repo
    }

    pub fn record(
        prefix: &str,
        min_length: u32,
        max_length: u32,
        network_name: &str,
        mnc: &str,
        live_coverage: bool,
    ) -> PrefixRecord {
        PrefixRecord {
            prefix: prefix.to_string(),
            min_length,
            max_length,
            country_name: "Cambodia".to_string(),
            network_name: network_name.to_string(),
            mcc: "456".to_string(),
            mnc: mnc.to_string(),
            live_coverage,
        }
    }

    pub fn insert(&self, record: PrefixRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> DomainResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("prefix table unavailable"));
        }
        Ok(())
    }
}

impl Default for MockPrefixRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrefixRepository for MockPrefixRepository {
    async fn find_by_prefix(&self, prefix: &str) -> DomainResult<Vec<PrefixRecord>> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.prefix == prefix)
            .cloned()
            .collect())
    }

    async fn find_starting_with(&self, digits: &str) -> DomainResult<Vec<PrefixRecord>> {
        self.check()?;
        let mut matches: Vec<PrefixRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.prefix.starts_with(digits))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        Ok(matches)
    }
}
