//! Value objects representing immutable domain concepts.

pub mod cache_key;
pub mod freshness;

// Re-export commonly used types
pub use cache_key::{cache_key, CACHE_KEY_PREFIX};
pub use freshness::FreshnessPreference;
