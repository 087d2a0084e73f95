//! Health probes for backing services

use async_trait::async_trait;

use pv_shared::types::ServiceHealth;

use crate::cache::VerificationCache;
#[cfg(feature = "mysql")]
use crate::database::DatabasePool;

/// A backing service that can report its health
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self) -> ServiceHealth;
}

fn health_from(result: Result<bool, crate::InfrastructureError>, what: &str) -> ServiceHealth {
    match result {
        Ok(true) => ServiceHealth::healthy(),
        Ok(false) => ServiceHealth::unhealthy(format!("{} returned an unexpected reply", what)),
        Err(e) => ServiceHealth::unhealthy(e.to_string()),
    }
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthProbe for DatabasePool {
    async fn probe(&self) -> ServiceHealth {
        health_from(self.health_check().await, "database")
    }
}

#[async_trait]
impl HealthProbe for VerificationCache {
    async fn probe(&self) -> ServiceHealth {
        health_from(self.health_check().await, self.kind())
    }
}
