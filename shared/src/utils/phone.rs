//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9]").unwrap()
});

/// Strip every non-digit character from a raw phone number.
///
/// This is the canonical "cleaned number" used as the lookup key for
/// prefixes, stored verifications and cache entries.
pub fn clean_number(raw: &str) -> String {
    NON_DIGIT_REGEX.replace_all(raw, "").into_owned()
}

/// Normalize a phone number by removing common formatting characters,
/// keeping a leading `+` if present
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for logs (e.g., 855****3242)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
