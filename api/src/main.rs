use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use pv_api::telemetry::init_tracing;
use pv_api::{create_app, AppState};
use pv_infra::health::HealthProbe;
use pv_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting phone verification API"
    );

    let infra = pv_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let service = Arc::new(infra.verification_service((&config.verification).into()));
    let database: Arc<dyn HealthProbe> = Arc::new(infra.database.clone());
    let cache: Arc<dyn HealthProbe> = infra.cache.clone();

    let app_state = web::Data::new(
        AppState::new(service, config.verification.clone())
            .with_probe("database", database)
            .with_probe("cache", cache),
    );

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    tracing::info!(address = %bind_address, "Server binding");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    infra.database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
