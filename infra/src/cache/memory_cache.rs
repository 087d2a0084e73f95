//! Process-local verification cache
//!
//! A TTL map for single-instance deployments and tests. Expired entries are
//! invisible to reads and are purged lazily; when the map reaches its
//! capacity a write first drops expired entries, then the entry closest to
//! expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use pv_core::services::VerificationCacheTrait;
use pv_shared::config::MemoryCacheConfig;

struct Entry {
    payload: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory verification cache with per-entry expiry
pub struct MemoryVerificationCache {
    entries: Mutex<HashMap<String, Entry>>,
    max_entries: usize,
}

impl MemoryVerificationCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self::with_capacity(config.max_entries)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, String> {
        self.entries
            .lock()
            .map_err(|_| "memory cache lock poisoned".to_string())
    }

    fn make_room(entries: &mut HashMap<String, Entry>, max_entries: usize, now: Instant) {
        if entries.len() < max_entries {
            return;
        }
        entries.retain(|_, entry| entry.is_live(now));
        if entries.len() < max_entries {
            return;
        }
        let soonest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = soonest {
            entries.remove(&key);
        }
    }
}

impl Default for MemoryVerificationCache {
    fn default() -> Self {
        Self::new(&MemoryCacheConfig::default())
    }
}

#[async_trait]
impl VerificationCacheTrait for MemoryVerificationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.payload.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), String> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        if !entries.contains_key(key) {
            Self::make_room(&mut entries, self.max_entries, now);
        }
        entries.insert(
            key.to_string(),
            Entry {
                payload: payload.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        let now = Instant::now();
        let removed = self.lock()?.remove(key);
        Ok(removed.map_or(false, |entry| entry.is_live(now)))
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .lock()?
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && entry.is_live(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
