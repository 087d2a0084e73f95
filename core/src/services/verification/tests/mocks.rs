//! Mock implementations for testing the verification service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::verification::Presence;
use crate::errors::CarrierError;
use crate::repositories::prefix::MockPrefixRepository;
use crate::repositories::verification::MockVerificationRepository;
use crate::services::verification::{
    stats_key, CarrierLookup, CarrierLookupTrait, CarrierReply, StatsStoreTrait,
    VerificationCacheTrait, VerificationService, VerificationServiceConfig,
};

// Mock cache backend for testing
pub struct MockVerificationCache {
    pub entries: Arc<Mutex<HashMap<String, String>>>,
    pub ttls: Arc<Mutex<HashMap<String, Duration>>>,
    pub should_fail: AtomicBool,
}

impl MockVerificationCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttls: Arc::new(Mutex::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn insert_raw(&self, key: &str, payload: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    fn check(&self) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Cache service error".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationCacheTrait for MockVerificationCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), String> {
        self.check()?;
        self.insert_raw(key, payload);
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.check()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        self.check()?;
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

// Mock carrier client for testing
pub struct MockCarrier {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub replies: Arc<Mutex<HashMap<String, Result<CarrierReply, CarrierError>>>>,
}

impl MockCarrier {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Override the reply for one number
    pub fn reply_with(&self, number: &str, reply: Result<CarrierReply, CarrierError>) {
        self.replies
            .lock()
            .unwrap()
            .insert(number.to_string(), reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn successful_lookup(number: &str) -> CarrierLookup {
        CarrierLookup {
            number: Some(number.to_string()),
            network: Some("Cellcard".to_string()),
            mcc: Some("456".to_string()),
            mnc: Some("01".to_string()),
            present: Some(Presence::Yes),
            status_message: Some("Success".to_string()),
            number_type: Some("mobile".to_string()),
            trxid: Some(format!("trx-{}", number)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl CarrierLookupTrait for MockCarrier {
    async fn lookup(&self, number: &str) -> Result<CarrierReply, CarrierError> {
        self.calls.lock().unwrap().push(number.to_string());
        match self.replies.lock().unwrap().get(number) {
            Some(reply) => reply.clone(),
            None => Ok(CarrierReply::Success(Self::successful_lookup(number))),
        }
    }
}

// Mock statistics store for testing
pub struct MockStatsStore {
    pub counters: Arc<Mutex<HashMap<String, u64>>>,
    pub should_fail: AtomicBool,
}

impl MockStatsStore {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(Mutex::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Counter value by short name (without namespace)
    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .get(&stats_key(name))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl StatsStoreTrait for MockStatsStore {
    async fn increment(&self, key: &str, by: u64) -> Result<u64, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Stats store error".to_string());
        }
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += by;
        Ok(*value)
    }
}

pub type TestService = VerificationService<
    MockPrefixRepository,
    MockVerificationRepository,
    MockVerificationCache,
    MockCarrier,
    MockStatsStore,
>;

/// Service wired to mocks, with handles kept for assertions
pub struct Harness {
    pub service: TestService,
    pub prefixes: Arc<MockPrefixRepository>,
    pub repository: Arc<MockVerificationRepository>,
    pub cache: Arc<MockVerificationCache>,
    pub carrier: Arc<MockCarrier>,
    pub stats: Arc<MockStatsStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(VerificationServiceConfig::default())
    }

    pub fn with_config(config: VerificationServiceConfig) -> Self {
        let prefixes = Arc::new(MockPrefixRepository::cambodia());
        let repository = Arc::new(MockVerificationRepository::new());
        let cache = Arc::new(MockVerificationCache::new());
        let carrier = Arc::new(MockCarrier::new());
        let stats = Arc::new(MockStatsStore::new());

        let service = VerificationService::new(
            prefixes.clone(),
            repository.clone(),
            cache.clone(),
            carrier.clone(),
            stats.clone(),
            config,
        );

        Self {
            service,
            prefixes,
            repository,
            cache,
            carrier,
            stats,
        }
    }
}
