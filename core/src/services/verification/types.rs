//! Types for verification service results

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::prefix::PrefixRecord;
use crate::domain::entities::verification::VerificationRecord;
use crate::errors::{DomainError, FailureReason};
use crate::services::prefix_resolver::Resolution;

/// Status code reported for numbers skipped for lack of coverage
pub const SKIPPED_STATUS: i32 = 999;
pub const SKIPPED_STATUS_MESSAGE: &str = "No Live Coverage";
pub const SKIP_REASON_NO_LIVE_COVERAGE: &str = "no_live_coverage";
pub const SKIPPED_MESSAGE: &str =
    "Phone number has no live coverage - API verification skipped to save costs";

/// Status code reported for carrier call failures
pub const API_FAILURE_STATUS: i32 = 1;

/// Where an outcome's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Cache,
    Database,
    Api,
    PrefixCheck,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Database => "database",
            Source::Api => "api",
            Source::PrefixCheck => "prefix_check",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of a failed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationFailure {
    /// Cleaned number (raw input when cleaning left nothing)
    pub number: String,
    pub reason: FailureReason,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// Length range of the matched prefix, as `min-max`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_prefix: Option<String>,
    /// Matched prefix record for partial matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PrefixRecord>,
}

impl VerificationFailure {
    pub fn new(number: impl Into<String>, reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            reason,
            message: message.into(),
            status: None,
            status_message: None,
            expected_length: None,
            actual_length: None,
            found_prefix: None,
            prefix: None,
        }
    }

    /// Failure for a resolution other than `Resolved`
    pub fn from_resolution(resolution: Resolution) -> Self {
        let message = resolution.message();
        match resolution {
            Resolution::NotFound { cleaned_number } if cleaned_number.is_empty() => {
                Self::new(cleaned_number, FailureReason::InvalidInput, message)
            }
            Resolution::NotFound { cleaned_number } => {
                Self::new(cleaned_number, FailureReason::PrefixNotFound, message)
            }
            Resolution::PartialMatch {
                prefix_record,
                cleaned_number,
            } => {
                let mut failure = Self::new(cleaned_number, FailureReason::PartialMatch, message);
                failure.expected_length = Some(prefix_record.expected_length());
                failure.actual_length = Some(failure.number.len());
                failure.found_prefix = Some(prefix_record.prefix.clone());
                failure.prefix = Some(prefix_record);
                failure
            }
            Resolution::LengthMismatch {
                prefix_record,
                cleaned_number,
            } => {
                let mut failure = Self::new(cleaned_number, FailureReason::LengthMismatch, message);
                failure.expected_length = Some(prefix_record.expected_length());
                failure.actual_length = Some(failure.number.len());
                failure.found_prefix = Some(prefix_record.prefix);
                failure
            }
            Resolution::Resolved { cleaned_number, .. } => Self::new(
                cleaned_number,
                FailureReason::InternalError,
                "Resolved number reported as a failure",
            ),
        }
    }

    /// Failure for a resolver error
    pub fn from_domain_error(number: impl Into<String>, error: &DomainError) -> Self {
        let mut failure = match error {
            DomainError::Storage { .. } => Self::new(
                number,
                FailureReason::InternalError,
                "Database error occurred while checking network prefix",
            ),
            other => Self::new(number, other.failure_reason(), other.to_string()),
        };
        if let DomainError::AmbiguousPrefix { prefix, .. } = error {
            failure.found_prefix = Some(prefix.clone());
        }
        failure
    }
}

/// Result of verifying one number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Verified {
        record: VerificationRecord,
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix: Option<PrefixRecord>,
        source: Source,
    },
    /// Known prefix without live coverage; the API was not called
    Skipped {
        number: String,
        prefix: PrefixRecord,
        status: i32,
        status_message: String,
        skip_reason: String,
        message: String,
        source: Source,
    },
    Failed(VerificationFailure),
}

impl VerificationOutcome {
    /// Skip outcome for a number whose prefix lacks live coverage
    pub fn skipped(number: impl Into<String>, prefix: PrefixRecord) -> Self {
        VerificationOutcome::Skipped {
            number: number.into(),
            prefix,
            status: SKIPPED_STATUS,
            status_message: SKIPPED_STATUS_MESSAGE.to_string(),
            skip_reason: SKIP_REASON_NO_LIVE_COVERAGE.to_string(),
            message: SKIPPED_MESSAGE.to_string(),
            source: Source::PrefixCheck,
        }
    }

    pub fn number(&self) -> &str {
        match self {
            VerificationOutcome::Verified { record, .. } => &record.number,
            VerificationOutcome::Skipped { number, .. } => number,
            VerificationOutcome::Failed(failure) => &failure.number,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, VerificationOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, VerificationOutcome::Failed(_))
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            VerificationOutcome::Verified { source, .. }
            | VerificationOutcome::Skipped { source, .. } => Some(*source),
            VerificationOutcome::Failed(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            VerificationOutcome::Failed(failure) => Some(failure.reason),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&VerificationRecord> {
        match self {
            VerificationOutcome::Verified { record, .. } => Some(record),
            _ => None,
        }
    }
}

impl From<VerificationFailure> for VerificationOutcome {
    fn from(failure: VerificationFailure) -> Self {
        VerificationOutcome::Failed(failure)
    }
}

/// Per-tier counters for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStatistics {
    pub total_numbers: usize,
    pub cache_hits: usize,
    pub database_hits: usize,
    pub api_calls: usize,
    pub skipped_no_coverage: usize,
}

/// Ordered outcomes of a batch, one per input
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub outcomes: Vec<VerificationOutcome>,
    pub statistics: BatchStatistics,
}

impl BatchResult {
    pub fn verified(&self) -> impl Iterator<Item = &VerificationOutcome> {
        self.outcomes.iter().filter(|o| o.is_verified())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &VerificationOutcome> {
        self.outcomes.iter().filter(|o| o.is_skipped())
    }

    pub fn failed(&self) -> impl Iterator<Item = &VerificationOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Cooperative cancellation signal for batch runs
///
/// Checked between items only; a lookup already in flight completes.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
