//! Unit tests for the Redis verification cache

use std::time::Duration;

use pv_core::services::VerificationCacheTrait;
use pv_core::{cache_key, CACHE_KEY_PREFIX};

use crate::cache::{CacheConfig, RedisClient, RedisVerificationCache};

#[test]
fn test_expiry_never_zero() {
    assert_eq!(RedisVerificationCache::expiry_seconds(Duration::from_secs(3600)), 3600);
    assert_eq!(RedisVerificationCache::expiry_seconds(Duration::from_millis(200)), 1);
}

#[test]
fn test_scan_pattern_escapes_glob_characters() {
    assert_eq!(
        RedisVerificationCache::scan_pattern(CACHE_KEY_PREFIX),
        "phone_verification_*"
    );
    assert_eq!(RedisVerificationCache::scan_pattern("a*b?"), "a\\*b\\?*");
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_round_trip_against_redis() {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    let cache = RedisVerificationCache::new(RedisClient::new(&config).await.unwrap());
    let key = cache_key("85592000001");

    cache.set(&key, "{\"number\":\"85592000001\"}", Duration::from_secs(60)).await.unwrap();
    assert!(cache.get(&key).await.unwrap().is_some());
    assert!(cache.keys(CACHE_KEY_PREFIX).await.unwrap().contains(&key));

    assert!(cache.delete(&key).await.unwrap());
    assert!(cache.get(&key).await.unwrap().is_none());
}
