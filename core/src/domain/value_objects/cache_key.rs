//! Cache key derivation for stored verifications.
//!
//! The digest only spreads keys across the namespace; it is not a security
//! boundary.

/// Namespace shared by every verification cache entry
pub const CACHE_KEY_PREFIX: &str = "phone_verification_";

/// Cache key for a cleaned phone number
pub fn cache_key(cleaned_number: &str) -> String {
    format!("{}{:x}", CACHE_KEY_PREFIX, md5::compute(cleaned_number.as_bytes()))
}
