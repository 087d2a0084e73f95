//! Freshness and cache policy
//!
//! Decides whether a stored verification is recent enough to return
//! instead of paying for a new carrier lookup. The same rule applies to the
//! cache tier and the database tier.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::freshness::FreshnessPreference;

/// Whether a result stored at `stored_at` satisfies `pref` right now
pub fn is_acceptable(stored_at: DateTime<Utc>, pref: FreshnessPreference) -> bool {
    is_acceptable_at(stored_at, pref, Utc::now())
}

/// Whether a result stored at `stored_at` satisfies `pref` at instant `now`
pub fn is_acceptable_at(
    stored_at: DateTime<Utc>,
    pref: FreshnessPreference,
    now: DateTime<Utc>,
) -> bool {
    match pref.normalized() {
        FreshnessPreference::Unspecified => true,
        FreshnessPreference::AlwaysFresh => false,
        FreshnessPreference::MaxAgeDays(days) => {
            now.signed_duration_since(stored_at) <= Duration::days(i64::from(days))
        }
    }
}

/// Whether both stored tiers must be bypassed
pub fn should_force_fresh(pref: FreshnessPreference) -> bool {
    matches!(pref, FreshnessPreference::AlwaysFresh)
}
