//! MySQL implementation of the PrefixRepository trait.
//!
//! Reads the network prefix table. Rows are returned as stored; duplicate
//! prefixes are left for the resolver to report.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use pv_core::domain::entities::PrefixRecord;
use pv_core::errors::{DomainError, DomainResult};
use pv_core::repositories::PrefixRepository;

/// Table holding one row per network prefix
pub const PREFIX_TABLE: &str = "phone_network_prefixes";

const PREFIX_COLUMNS: &str =
    "prefix, min_length, max_length, country_name, network_name, mcc, mnc, live_coverage";

/// MySQL implementation of PrefixRepository
pub struct MySqlPrefixRepository {
    pool: MySqlPool,
}

impl MySqlPrefixRepository {
    /// Create a new MySQL prefix repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to PrefixRecord entity
    ///
    /// `mcc`, `mnc` and `live_coverage` are nullable in the table; missing
    /// values become empty strings and "no coverage".
    fn row_to_prefix(row: &sqlx::mysql::MySqlRow) -> Result<PrefixRecord, DomainError> {
        let min_length: i32 = row.try_get("min_length").map_err(|e| DomainError::Internal {
            message: format!("Failed to get min_length: {}", e),
        })?;
        let max_length: i32 = row.try_get("max_length").map_err(|e| DomainError::Internal {
            message: format!("Failed to get max_length: {}", e),
        })?;

        Ok(PrefixRecord {
            prefix: row.try_get("prefix").map_err(|e| DomainError::Internal {
                message: format!("Failed to get prefix: {}", e),
            })?,
            min_length: length_bound(min_length, "min_length")?,
            max_length: length_bound(max_length, "max_length")?,
            country_name: row.try_get("country_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get country_name: {}", e),
            })?,
            network_name: row.try_get("network_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get network_name: {}", e),
            })?,
            mcc: row
                .try_get::<Option<String>, _>("mcc")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get mcc: {}", e),
                })?
                .unwrap_or_default(),
            mnc: row
                .try_get::<Option<String>, _>("mnc")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get mnc: {}", e),
                })?
                .unwrap_or_default(),
            live_coverage: row
                .try_get::<Option<bool>, _>("live_coverage")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get live_coverage: {}", e),
                })?
                .unwrap_or(false),
        })
    }

    fn rows_to_prefixes(rows: &[sqlx::mysql::MySqlRow]) -> DomainResult<Vec<PrefixRecord>> {
        rows.iter().map(Self::row_to_prefix).collect()
    }
}

fn length_bound(value: i32, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| DomainError::Internal {
        message: format!("Negative {} in prefix table: {}", column, value),
    })
}

#[async_trait]
impl PrefixRepository for MySqlPrefixRepository {
    async fn find_by_prefix(&self, prefix: &str) -> DomainResult<Vec<PrefixRecord>> {
        let query = format!("SELECT {} FROM {} WHERE prefix = ?", PREFIX_COLUMNS, PREFIX_TABLE);

        let rows = sqlx::query(&query)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find prefix: {}", e)))?;

        Self::rows_to_prefixes(&rows)
    }

    async fn find_starting_with(&self, digits: &str) -> DomainResult<Vec<PrefixRecord>> {
        let query = format!(
            "SELECT {} FROM {} WHERE prefix LIKE CONCAT(?, '%') ORDER BY prefix ASC",
            PREFIX_COLUMNS, PREFIX_TABLE
        );

        let rows = sqlx::query(&query)
            .bind(escape_like(digits))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to search prefixes: {}", e))
            })?;

        Self::rows_to_prefixes(&rows)
    }
}

/// Escape LIKE wildcards so the input only ever matches literally
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
