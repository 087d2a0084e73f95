//! Prefix resolver implementation

use std::sync::Arc;

use pv_shared::utils::phone::{clean_number, mask_phone_number};

use crate::domain::entities::prefix::{PrefixRecord, MAX_PREFIX_LENGTH, MIN_PREFIX_LENGTH};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::prefix::PrefixRepository;

use super::types::{Resolution, FORWARD_SEARCH_MAX_LENGTH, MULTIPLE_NETWORKS_MAX_LENGTH};

/// Resolves phone numbers against the prefix table
pub struct PrefixResolver<P: PrefixRepository> {
    repository: Arc<P>,
}

impl<P: PrefixRepository> Clone for PrefixResolver<P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<P: PrefixRepository> PrefixResolver<P> {
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Resolve a raw phone number
    ///
    /// Non-digit characters are stripped first. Candidate prefixes are tried
    /// from six digits down to two, capped at the number's own length.
    ///
    /// # Returns
    /// * `Ok(Resolution)` - Match classification, including `NotFound`
    /// * `Err(DomainError::Storage)` - The prefix table could not be read
    /// * `Err(DomainError::AmbiguousPrefix)` - Two rows share one exact prefix
    pub async fn resolve(&self, raw: &str) -> DomainResult<Resolution> {
        let cleaned_number = clean_number(raw);
        if cleaned_number.is_empty() {
            return Ok(Resolution::NotFound { cleaned_number });
        }

        let result = self.resolve_cleaned(cleaned_number).await;
        if let Err(e) = &result {
            tracing::error!(
                number = %mask_phone_number(raw),
                error = %e,
                event = "prefix_resolution_failed",
                "Prefix lookup failed"
            );
        }
        result
    }

    async fn resolve_cleaned(&self, cleaned_number: String) -> DomainResult<Resolution> {
        let len = cleaned_number.len();
        let longest = MAX_PREFIX_LENGTH.min(len);

        // Longest exact prefix whose bounds rejected the number
        let mut out_of_bounds: Option<PrefixRecord> = None;

        for prefix_len in (MIN_PREFIX_LENGTH..=longest).rev() {
            let candidate = &cleaned_number[..prefix_len];
            let Some(record) = self.find_exact(candidate, len).await? else {
                continue;
            };

            if record.admits(len) {
                tracing::debug!(
                    prefix = %record.prefix,
                    network = %record.network_name,
                    "Prefix resolved"
                );
                return Ok(Resolution::Resolved {
                    prefix_record: record,
                    cleaned_number,
                });
            }
            out_of_bounds.get_or_insert(record);
        }

        if let Some(record) = out_of_bounds {
            return Ok(if len < record.min_length as usize {
                Resolution::PartialMatch {
                    prefix_record: record,
                    cleaned_number,
                }
            } else {
                Resolution::LengthMismatch {
                    prefix_record: record,
                    cleaned_number,
                }
            });
        }

        if len < FORWARD_SEARCH_MAX_LENGTH {
            return self.forward_search(cleaned_number).await;
        }

        Ok(Resolution::NotFound { cleaned_number })
    }

    /// Look up one exact prefix for a number of `len` digits.
    ///
    /// Duplicate rows are only ambiguous when more than one of them admits
    /// `len`. When none admit it, the first row is returned for reporting.
    async fn find_exact(&self, prefix: &str, len: usize) -> DomainResult<Option<PrefixRecord>> {
        let mut rows = self.repository.find_by_prefix(prefix).await?;
        let admitting = rows.iter().filter(|r| r.admits(len)).count();
        match admitting {
            0 => Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) }),
            1 => Ok(rows.into_iter().find(|r| r.admits(len))),
            candidates => Err(DomainError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                candidates,
            }),
        }
    }

    async fn forward_search(&self, cleaned_number: String) -> DomainResult<Resolution> {
        let candidates = self.repository.find_starting_with(&cleaned_number).await?;

        let exact: Vec<&PrefixRecord> = candidates
            .iter()
            .filter(|r| r.prefix == cleaned_number)
            .collect();
        if exact.len() > 1 {
            return Err(DomainError::AmbiguousPrefix {
                prefix: cleaned_number,
                candidates: exact.len(),
            });
        }
        if let Some(record) = exact.first() {
            let prefix_record = (*record).clone();
            return Ok(Resolution::PartialMatch {
                prefix_record,
                cleaned_number,
            });
        }

        let Some(first) = candidates.first() else {
            return Ok(Resolution::NotFound { cleaned_number });
        };

        let prefix_record = if cleaned_number.len() <= MULTIPLE_NETWORKS_MAX_LENGTH {
            PrefixRecord::multiple_networks(first)
        } else {
            first.clone()
        };

        Ok(Resolution::PartialMatch {
            prefix_record,
            cleaned_number,
        })
    }
}
