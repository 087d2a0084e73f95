//! Resolution result type

use serde::Serialize;

use crate::domain::entities::prefix::PrefixRecord;

/// Forward search only runs for inputs shorter than this
pub const FORWARD_SEARCH_MAX_LENGTH: usize = 8;

/// Inputs up to this many digits report several matching networks as one
/// placeholder record
pub const MULTIPLE_NETWORKS_MAX_LENGTH: usize = 4;

/// Outcome of resolving a phone number against the prefix table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum Resolution {
    /// A prefix matched and the number length fits its bounds
    Resolved {
        prefix_record: PrefixRecord,
        cleaned_number: String,
    },
    /// A prefix matched but the number is incomplete
    PartialMatch {
        prefix_record: PrefixRecord,
        cleaned_number: String,
    },
    /// A prefix matched but the number is longer than allowed
    LengthMismatch {
        prefix_record: PrefixRecord,
        cleaned_number: String,
    },
    NotFound { cleaned_number: String },
}

impl Resolution {
    pub fn cleaned_number(&self) -> &str {
        match self {
            Resolution::Resolved { cleaned_number, .. }
            | Resolution::PartialMatch { cleaned_number, .. }
            | Resolution::LengthMismatch { cleaned_number, .. }
            | Resolution::NotFound { cleaned_number } => cleaned_number,
        }
    }

    pub fn prefix_record(&self) -> Option<&PrefixRecord> {
        match self {
            Resolution::Resolved { prefix_record, .. }
            | Resolution::PartialMatch { prefix_record, .. }
            | Resolution::LengthMismatch { prefix_record, .. } => Some(prefix_record),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }

    /// Human-readable explanation suitable for end users
    pub fn message(&self) -> String {
        match self {
            Resolution::Resolved { prefix_record, .. } => format!(
                "{} ({}) number recognised",
                prefix_record.network_name, prefix_record.country_name
            ),
            Resolution::PartialMatch {
                prefix_record,
                cleaned_number,
            } if prefix_record.is_multiple() => format!(
                "Phone number incomplete. Several networks start with \"{}\"",
                cleaned_number
            ),
            Resolution::PartialMatch {
                prefix_record,
                cleaned_number,
            } => format!(
                "Phone number incomplete. Expected {} digits, got {}",
                prefix_record.expected_length(),
                cleaned_number.len()
            ),
            Resolution::LengthMismatch {
                prefix_record,
                cleaned_number,
            } => format!(
                "Phone number length invalid. Expected {} digits, got {}",
                prefix_record.expected_length(),
                cleaned_number.len()
            ),
            Resolution::NotFound { cleaned_number } if cleaned_number.is_empty() => {
                "Invalid phone number format".to_string()
            }
            Resolution::NotFound { cleaned_number }
                if cleaned_number.len() < FORWARD_SEARCH_MAX_LENGTH =>
            {
                format!("No network prefix found starting with \"{}\"", cleaned_number)
            }
            Resolution::NotFound { .. } => "Phone number prefix not found in database".to_string(),
        }
    }
}
