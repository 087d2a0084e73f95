//! Redis cache client implementation
//!
//! Redis client with a multiplexed connection, retry logic and the handful
//! of commands the verification cache and statistics store need: set with
//! expiry, get, delete, counters and key scans.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use pv_shared::CacheConfig;

use crate::InfrastructureError;

/// Keys requested per SCAN round trip
const SCAN_BATCH: usize = 500;

/// Upper bound for the retry backoff
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts per operation
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            database = config.database,
            "Creating Redis client"
        );

        let mut info = redis::IntoConnectionInfo::into_connection_info(config.url.as_str())
            .map_err(|e| {
                error!(error = %e, "Failed to parse Redis URL");
                InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
            })?;
        if config.database > 0 {
            info.redis.db = i64::from(config.database);
        }

        let client = Client::open(info).map_err(|e| {
            error!(error = %e, "Failed to open Redis client");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            max_retries.max(1),
            retry_delay_ms,
            Duration::from_secs(config.connection_timeout.max(1)),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries: max_retries.max(1),
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Attempting to connect to Redis");

            let outcome =
                tokio::time::timeout(timeout, client.get_multiplexed_async_connection()).await;

            match outcome {
                Ok(Ok(connection)) => return Ok(connection),
                Ok(Err(e)) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries,
                        error = %e,
                        "Failed to connect to Redis, retrying in {}ms",
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Ok(Err(e)) => {
                    error!(attempts, error = %e, "Failed to connect to Redis");
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) => {
                    error!(attempts, "Timed out connecting to Redis");
                    return Err(InfrastructureError::General(format!(
                        "Redis connection timed out after {}s",
                        timeout.as_secs()
                    )));
                }
            }
        }
    }

    /// Set a value with expiration time in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key, expiry_seconds, "Setting key");

        let key_owned = key.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value, `None` when the key is absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to get key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key_owned = key.to_string();
        let deleted = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to delete key");
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted > 0)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Time-to-live for a key, `None` if it doesn't exist or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key_owned = key.to_string();
        let ttl = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;

        Ok((ttl >= 0).then_some(ttl))
    }

    /// Add `by` to a counter, setting `expiry_seconds` when the counter is
    /// created by this call
    pub async fn increment_by(
        &self,
        key: &str,
        by: u64,
        expiry_seconds: Option<u64>,
    ) -> Result<u64, InfrastructureError> {
        let key_owned = key.to_string();
        let count = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move {
                    let count: u64 = conn.incr(&key, by).await?;
                    if count == by {
                        if let Some(ttl) = expiry_seconds {
                            conn.expire::<_, ()>(&key, ttl as i64).await?;
                        }
                    }
                    Ok(count)
                })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to increment counter");
                InfrastructureError::Cache(e)
            })?;

        debug!(key, count, "Counter incremented");
        Ok(count)
    }

    /// Collect every key matching a glob pattern
    ///
    /// Uses cursor-based SCAN so large keyspaces are walked without
    /// blocking the server the way KEYS would.
    pub async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, InfrastructureError> {
        let pattern_owned = pattern.to_string();
        let mut keys = self
            .execute_with_retry(move |mut conn| {
                let pattern = pattern_owned.clone();
                Box::pin(async move {
                    let mut found = Vec::new();
                    let mut cursor: u64 = 0;
                    loop {
                        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(&pattern)
                            .arg("COUNT")
                            .arg(SCAN_BATCH)
                            .query_async(&mut conn)
                            .await?;
                        found.extend(batch);
                        if next == 0 {
                            break;
                        }
                        cursor = next;
                    }
                    Ok(found)
                })
            })
            .await
            .map_err(|e| {
                error!(pattern, error = %e, "Failed to scan keys");
                InfrastructureError::Cache(e)
            })?;

        // SCAN may report a key more than once across rounds
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Redis health check failed");
                InfrastructureError::Cache(e)
            })?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!(response = %response, "Redis health check returned unexpected response");
            Ok(false)
        }
    }

    /// Execute a Redis operation with retries and exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        attempt = attempts,
                        max_retries = self.max_retries,
                        error = %e,
                        "Redis operation failed, retrying in {}ms",
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
