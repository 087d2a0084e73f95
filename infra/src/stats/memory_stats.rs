//! In-memory statistics counters

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use pv_core::services::StatsStoreTrait;

/// Process-local counters
#[derive(Default)]
pub struct MemoryStatsStore {
    counters: Mutex<HashMap<String, u64>>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, 0 when never incremented
    pub fn get(&self, key: &str) -> u64 {
        self.counters
            .lock()
            .map(|counters| counters.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Every counter whose key starts with `prefix`, sorted by key
    pub fn snapshot(&self, prefix: &str) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counters
            .lock()
            .map(|counters| {
                counters
                    .iter()
                    .filter(|(key, _)| key.starts_with(prefix))
                    .map(|(key, value)| (key.clone(), *value))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort();
        entries
    }
}

#[async_trait]
impl StatsStoreTrait for MemoryStatsStore {
    async fn increment(&self, key: &str, by: u64) -> Result<u64, String> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| "stats lock poisoned".to_string())?;
        let value = counters.entry(key.to_string()).or_insert(0);
        *value = value.saturating_add(by);
        Ok(*value)
    }
}
