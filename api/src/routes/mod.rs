//! Route handlers
//!
//! Handlers are generic over the verification service's collaborators so
//! the same code serves MySQL/Redis in production and in-memory backends in
//! tests.

pub mod health;
pub mod maintenance;
pub mod prefix;
pub mod verify;

use std::sync::Arc;

use pv_core::repositories::{PrefixRepository, VerificationRepository};
use pv_core::services::verification::{CarrierLookupTrait, StatsStoreTrait, VerificationCacheTrait};
use pv_core::VerificationService;
use pv_infra::health::HealthProbe;
use pv_shared::VerificationSettings;

/// Application state that holds shared services
pub struct AppState<P, R, C, L, T>
where
    P: PrefixRepository,
    R: VerificationRepository,
    C: VerificationCacheTrait,
    L: CarrierLookupTrait,
    T: StatsStoreTrait,
{
    pub verification_service: Arc<VerificationService<P, R, C, L, T>>,
    pub settings: VerificationSettings,
    /// Named backing services reported by `/health`
    pub probes: Vec<(String, Arc<dyn HealthProbe>)>,
    pub version: String,
}

impl<P, R, C, L, T> AppState<P, R, C, L, T>
where
    P: PrefixRepository,
    R: VerificationRepository,
    C: VerificationCacheTrait,
    L: CarrierLookupTrait,
    T: StatsStoreTrait,
{
    pub fn new(
        verification_service: Arc<VerificationService<P, R, C, L, T>>,
        settings: VerificationSettings,
    ) -> Self {
        Self {
            verification_service,
            settings,
            probes: Vec::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_probe(mut self, name: impl Into<String>, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push((name.into(), probe));
        self
    }
}
