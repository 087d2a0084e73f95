//! Cache module for verification records
//!
//! Provides the Redis client, the Redis-backed and process-local
//! verification caches, and the configured backend selector.

pub mod backend;
pub mod memory_cache;
pub mod redis_client;
pub mod verification_cache;

#[cfg(test)]
mod tests;

pub use backend::VerificationCache;
pub use memory_cache::MemoryVerificationCache;
pub use redis_client::RedisClient;
pub use verification_cache::RedisVerificationCache;

// Re-export commonly used types
pub use pv_shared::CacheConfig;
