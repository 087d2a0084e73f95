//! Caller preference for how old a stored verification may be.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How stale a cached or stored verification may be before a fresh carrier
/// lookup is required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "days")]
pub enum FreshnessPreference {
    /// Any stored result is acceptable
    #[default]
    Unspecified,
    /// Stored results up to this many days old are acceptable
    MaxAgeDays(u32),
    /// Never reuse stored results
    AlwaysFresh,
}

impl FreshnessPreference {
    /// Collapse `MaxAgeDays(0)` into `Unspecified`
    pub fn normalized(self) -> Self {
        match self {
            FreshnessPreference::MaxAgeDays(0) => FreshnessPreference::Unspecified,
            other => other,
        }
    }

    /// Parse the optional wire form; `None` means no preference
    pub fn from_wire(value: Option<&str>) -> Result<Self, String> {
        value.map_or(Ok(FreshnessPreference::Unspecified), str::parse)
    }
}

impl FromStr for FreshnessPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Ok(FreshnessPreference::Unspecified);
        }
        if value.eq_ignore_ascii_case("all") {
            return Ok(FreshnessPreference::AlwaysFresh);
        }
        value
            .parse::<u32>()
            .map(|days| FreshnessPreference::MaxAgeDays(days).normalized())
            .map_err(|_| format!("Invalid data freshness value: {}", value))
    }
}

impl fmt::Display for FreshnessPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreshnessPreference::Unspecified => f.write_str(""),
            FreshnessPreference::MaxAgeDays(days) => write!(f, "{}", days),
            FreshnessPreference::AlwaysFresh => f.write_str("all"),
        }
    }
}
