//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_connections: 10,
            connection_timeout: 5,
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let max_connections = std::env::var("REDIS_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            url,
            max_connections,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }
}

/// Process-local cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries before expired entries are purged on write
    pub max_entries: usize,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self { max_entries: 100_000 }
    }
}

/// Cache strategy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheStrategyConfig {
    /// Enable the cache tier at all; when disabled every lookup falls
    /// through to the database
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cache backend
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Redis configuration
    #[serde(default)]
    pub redis: Option<CacheConfig>,

    /// Memory cache configuration
    #[serde(default)]
    pub memory: Option<MemoryCacheConfig>,
}

/// Cache type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    Memory,
}

impl std::str::FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "local" => Ok(CacheType::Memory),
            _ => Err(format!("Invalid cache type: {}", s)),
        }
    }
}

impl Default for CacheStrategyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            cache_type: default_cache_type(),
            redis: Some(CacheConfig::default()),
            memory: Some(MemoryCacheConfig::default()),
        }
    }
}

impl CacheStrategyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let cache_type = std::env::var("CACHE_TYPE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cache_type);
        let enabled = std::env::var("CACHE_ENABLED")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            enabled,
            cache_type,
            redis: Some(CacheConfig::from_env()),
            memory: Some(MemoryCacheConfig::default()),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_cache_type() -> CacheType {
    CacheType::Memory
}
