//! Shared fixtures for API tests: in-memory backends and a stub carrier
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;

use pv_api::AppState;
use pv_core::errors::CarrierError;
use pv_core::{
    CarrierLookup, CarrierLookupTrait, CarrierReply, PrefixRecord, Presence, VerificationService,
    VerificationServiceConfig,
};
use pv_infra::cache::{MemoryVerificationCache, VerificationCache};
use pv_infra::health::HealthProbe;
use pv_infra::memory::{InMemoryPrefixRepository, InMemoryVerificationRepository};
use pv_infra::stats::MemoryStatsStore;
use pv_shared::{ServiceHealth, VerificationSettings};

pub const CELLCARD: &str = "85592313242";
pub const NO_COVERAGE: &str = "85510234567";
pub const TOO_LONG: &str = "855923132421234";

/// Carrier stand-in that records every call
pub struct StubCarrier {
    pub calls: Mutex<Vec<String>>,
    pub unavailable: AtomicBool,
}

impl StubCarrier {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CarrierLookupTrait for StubCarrier {
    async fn lookup(&self, number: &str) -> Result<CarrierReply, CarrierError> {
        self.calls.lock().unwrap().push(number.to_string());
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CarrierError::HttpStatus { status: 503 });
        }
        Ok(CarrierReply::Success(CarrierLookup {
            number: Some(number.to_string()),
            network: Some("Cellcard".to_string()),
            present: Some(Presence::Yes),
            status_message: Some("Success".to_string()),
            number_type: Some("mobile".to_string()),
            trxid: Some(format!("trx-{}", number)),
            ..Default::default()
        }))
    }
}

/// Probe that always reports the given health
pub struct FixedProbe(pub ServiceHealth);

#[async_trait]
impl HealthProbe for FixedProbe {
    async fn probe(&self) -> ServiceHealth {
        self.0.clone()
    }
}

pub type TestState = AppState<
    InMemoryPrefixRepository,
    InMemoryVerificationRepository,
    VerificationCache,
    StubCarrier,
    MemoryStatsStore,
>;

/// App state over in-memory backends, with handles kept for assertions
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub repository: Arc<InMemoryVerificationRepository>,
    pub cache: Arc<VerificationCache>,
    pub carrier: Arc<StubCarrier>,
    pub stats: Arc<MemoryStatsStore>,
}

fn prefix(prefix: &str, network: &str, mnc: &str, live_coverage: bool) -> PrefixRecord {
    PrefixRecord {
        prefix: prefix.to_string(),
        min_length: 11,
        max_length: 11,
        country_name: "Cambodia".to_string(),
        network_name: network.to_string(),
        mcc: "456".to_string(),
        mnc: mnc.to_string(),
        live_coverage,
    }
}

pub fn cambodia_prefixes() -> InMemoryPrefixRepository {
    InMemoryPrefixRepository::new(vec![
        prefix("85592", "Cellcard", "01", true),
        prefix("85512", "Cellcard", "01", true),
        prefix("85510", "Smart", "06", false),
    ])
}

pub fn test_context() -> TestContext {
    test_context_with(VerificationSettings::default())
}

pub fn test_context_with(settings: VerificationSettings) -> TestContext {
    let prefixes = Arc::new(cambodia_prefixes());
    let repository = Arc::new(InMemoryVerificationRepository::new());
    let cache = Arc::new(VerificationCache::Memory(MemoryVerificationCache::with_capacity(1_000)));
    let carrier = Arc::new(StubCarrier::new());
    let stats = Arc::new(MemoryStatsStore::new());

    let config = VerificationServiceConfig {
        cache_ttl: Duration::from_secs(3600),
        batch_pacing: Duration::ZERO,
    };
    let service = Arc::new(VerificationService::new(
        prefixes,
        repository.clone(),
        cache.clone(),
        carrier.clone(),
        stats.clone(),
        config,
    ));

    let cache_probe: Arc<dyn HealthProbe> = cache.clone();
    let state = AppState::new(service, settings).with_probe("cache", cache_probe);

    TestContext {
        state: web::Data::new(state),
        repository,
        cache,
        carrier,
        stats,
    }
}
