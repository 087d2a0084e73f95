//! Network prefix entity.

use serde::{Deserialize, Serialize};

/// Longest prefix tried during resolution
pub const MAX_PREFIX_LENGTH: usize = 6;

/// Shortest prefix tried during resolution
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Placeholder prefix reported when a short input matches several networks
pub const MULTIPLE_PREFIX: &str = "Multiple";

/// Placeholder network name paired with [`MULTIPLE_PREFIX`]
pub const MULTIPLE_NETWORKS_NAME: &str = "Multiple Networks Available";

/// One row of the prefix table: a leading digit sequence identifying a
/// country and mobile network, with the valid total length range for
/// numbers carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRecord {
    /// Digit-only prefix, unique across the table
    pub prefix: String,

    /// Inclusive minimum total number length
    pub min_length: u32,

    /// Inclusive maximum total number length
    pub max_length: u32,

    pub country_name: String,

    pub network_name: String,

    /// Mobile country code
    pub mcc: String,

    /// Mobile network code
    pub mnc: String,

    /// Whether the carrier API can verify numbers under this prefix
    pub live_coverage: bool,
}

impl PrefixRecord {
    /// Whether a cleaned number of `len` digits fits this prefix's bounds
    pub fn admits(&self, len: usize) -> bool {
        (self.min_length as usize) <= len && len <= (self.max_length as usize)
    }

    /// Length range formatted as `min-max`
    pub fn expected_length(&self) -> String {
        format!("{}-{}", self.min_length, self.max_length)
    }

    /// Synthesized record for a short input that prefixes several networks.
    ///
    /// Country, MCC and length bounds come from `first`; the network identity
    /// is a placeholder and coverage is reported as available.
    pub fn multiple_networks(first: &PrefixRecord) -> Self {
        Self {
            prefix: MULTIPLE_PREFIX.to_string(),
            min_length: first.min_length,
            max_length: first.max_length,
            country_name: first.country_name.clone(),
            network_name: MULTIPLE_NETWORKS_NAME.to_string(),
            mcc: first.mcc.clone(),
            mnc: "XX".to_string(),
            live_coverage: true,
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.prefix == MULTIPLE_PREFIX
    }
}
