//! Configuration module with business-specific sub-modules
//!
//! - `cache` - Caching strategy and Redis configuration
//! - `carrier` - Remote carrier lookup API
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `verification` - Cache TTL, batch pacing and statistics retention

pub mod cache;
pub mod carrier;
pub mod database;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use cache::{CacheConfig, CacheStrategyConfig, CacheType, MemoryCacheConfig};
pub use carrier::CarrierApiConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationSettings;

/// Prefix for environment variable overrides, e.g. `PV__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "PV";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub cache: CacheStrategyConfig,

    #[serde(default)]
    pub carrier: CarrierApiConfig,

    #[serde(default)]
    pub verification: VerificationSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Build configuration from plain environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheStrategyConfig::from_env(),
            carrier: CarrierApiConfig::from_env(),
            verification: VerificationSettings::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Layered load: `.env`, then `config/<environment>.toml` when present,
    /// then `PV__SECTION__KEY` overrides on top of the `from_env` baseline
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();

        let baseline = Self::from_env();
        let file = format!("config/{}", baseline.environment.config_name());

        let layered = config::Config::builder()
            .add_source(config::Config::try_from(&baseline)?)
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        layered.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sections() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.verification.cache_ttl_seconds, 3600);
        assert_eq!(config.cache.cache_type, CacheType::Memory);
        assert!(!config.carrier.has_credentials());
    }

    #[test]
    fn test_config_roundtrips_through_config_crate() {
        let baseline = AppConfig::default();
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&baseline).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(loaded.server.port, baseline.server.port);
        assert_eq!(loaded.carrier.base_url, baseline.carrier.base_url);
    }
}
