use serde::{Deserialize, Serialize};
use validator::Validate;

use pv_core::{BatchResult, BatchStatistics, Resolution, VerificationOutcome};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PrefixCheckRequest {
    /// Number as typed, separators allowed
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrefixCheckResponse {
    pub message: String,
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl From<Resolution> for PrefixCheckResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            message: resolution.message(),
            resolution,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,

    /// Empty for any stored result, `all` to force a carrier call, or a
    /// maximum age in days
    #[serde(default)]
    pub data_freshness: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchVerifyRequest {
    #[validate(length(min = 1, message = "No phone numbers provided"))]
    pub phone_numbers: Vec<String>,

    #[serde(default)]
    pub data_freshness: Option<String>,
}

impl BatchVerifyRequest {
    /// Trimmed numbers with blank lines dropped
    pub fn numbers(&self) -> Vec<String> {
        self.phone_numbers
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Batch counters as reported to clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatisticsDto {
    pub cache_hits: usize,
    pub database_hits: usize,
    pub api_calls: usize,
    pub skipped_no_coverage: usize,
    pub total_cached: usize,
    pub live_coverage_results: usize,
    pub no_coverage_results: usize,
    pub error_results: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchVerifyResponse {
    pub processed: usize,
    pub live_coverage_count: usize,
    pub no_coverage_count: usize,
    pub error_count: usize,
    pub statistics: BatchStatisticsDto,
    pub cache_message: String,
    pub live_coverage_data: Vec<VerificationOutcome>,
    pub no_coverage_data: Vec<VerificationOutcome>,
    pub error_data: Vec<VerificationOutcome>,
}

impl From<BatchResult> for BatchVerifyResponse {
    fn from(result: BatchResult) -> Self {
        let processed = result.outcomes.len();
        let BatchResult { outcomes, statistics } = result;

        let mut live_coverage_data = Vec::new();
        let mut no_coverage_data = Vec::new();
        let mut error_data = Vec::new();
        for outcome in outcomes {
            match outcome {
                VerificationOutcome::Verified { .. } => live_coverage_data.push(outcome),
                VerificationOutcome::Skipped { .. } => no_coverage_data.push(outcome),
                VerificationOutcome::Failed(_) => error_data.push(outcome),
            }
        }

        let dto = BatchStatisticsDto {
            cache_hits: statistics.cache_hits,
            database_hits: statistics.database_hits,
            api_calls: statistics.api_calls,
            skipped_no_coverage: statistics.skipped_no_coverage,
            total_cached: statistics.cache_hits + statistics.database_hits,
            live_coverage_results: live_coverage_data.len(),
            no_coverage_results: no_coverage_data.len(),
            error_results: error_data.len(),
        };

        Self {
            processed,
            live_coverage_count: live_coverage_data.len(),
            no_coverage_count: no_coverage_data.len(),
            error_count: error_data.len(),
            cache_message: cache_message(&statistics),
            statistics: dto,
            live_coverage_data,
            no_coverage_data,
            error_data,
        }
    }
}

/// One-line summary of where a batch's results came from
pub fn cache_message(statistics: &BatchStatistics) -> String {
    let total_cached = statistics.cache_hits + statistics.database_hits;
    let mut message = format!(
        "Performance: {} numbers found in cache ({} from cache, {} from database), \
         {} new API calls made, {} skipped (no live coverage)",
        total_cached,
        statistics.cache_hits,
        statistics.database_hits,
        statistics.api_calls,
        statistics.skipped_no_coverage
    );

    if statistics.total_numbers > 0 {
        let rate = total_cached as f64 / statistics.total_numbers as f64 * 100.0;
        message.push_str(&format!(" - {:.1}% cache hit rate", rate));
    }
    message
}
