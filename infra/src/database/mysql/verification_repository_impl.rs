//! MySQL implementation of the VerificationRepository trait.
//!
//! Stores one carrier lookup snapshot per number. The table may hold older
//! rows for the same number; reads always take the newest by `created_at`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use pv_core::domain::entities::{Presence, VerificationRecord};
use pv_core::errors::{DomainError, DomainResult};
use pv_core::repositories::VerificationRepository;

/// Table holding stored carrier lookups
pub const VERIFICATION_TABLE: &str = "phone_verifications";

const VERIFICATION_COLUMNS: &str = "id, number, prefix, cic, error, imsi, mcc, mnc, network, \
     ported, present, status, status_message, type, trxid, created_at, updated_at";

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    /// Create a new MySQL verification repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        let created_at = row
            .try_get::<Option<DateTime<Utc>>, _>("created_at")
            .map_err(|e| column_error("created_at", e))?;
        let updated_at = row
            .try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .map_err(|e| column_error("updated_at", e))?;
        let present = row
            .try_get::<Option<String>, _>("present")
            .map_err(|e| column_error("present", e))?;

        let mut record = VerificationRecord::new(
            row.try_get::<String, _>("number")
                .map_err(|e| column_error("number", e))?,
        );
        record.id = Some(row.try_get::<u64, _>("id").map_err(|e| column_error("id", e))?);
        record.prefix = row.try_get("prefix").map_err(|e| column_error("prefix", e))?;
        record.cic = row.try_get("cic").map_err(|e| column_error("cic", e))?;
        record.error = row
            .try_get::<Option<i32>, _>("error")
            .map_err(|e| column_error("error", e))?
            .unwrap_or(0);
        record.imsi = row.try_get("imsi").map_err(|e| column_error("imsi", e))?;
        record.mcc = row.try_get("mcc").map_err(|e| column_error("mcc", e))?;
        record.mnc = row.try_get("mnc").map_err(|e| column_error("mnc", e))?;
        record.network = row.try_get("network").map_err(|e| column_error("network", e))?;
        record.ported = row
            .try_get::<Option<bool>, _>("ported")
            .map_err(|e| column_error("ported", e))?
            .unwrap_or(false);
        record.present = present.as_deref().map(Presence::from_loose);
        record.status = row
            .try_get::<Option<i32>, _>("status")
            .map_err(|e| column_error("status", e))?
            .unwrap_or(0);
        record.status_message = row
            .try_get("status_message")
            .map_err(|e| column_error("status_message", e))?;
        record.number_type = row.try_get("type").map_err(|e| column_error("type", e))?;
        record.trxid = row.try_get("trxid").map_err(|e| column_error("trxid", e))?;
        if let Some(created_at) = created_at {
            record.created_at = created_at;
        }
        record.updated_at = updated_at.unwrap_or(record.created_at);

        Ok(record)
    }

    async fn find_latest_id(&self, number: &str) -> DomainResult<Option<u64>> {
        let query = format!(
            "SELECT id FROM {} WHERE number = ? ORDER BY created_at DESC LIMIT 1",
            VERIFICATION_TABLE
        );

        let row = sqlx::query(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to look up verification: {}", e)))?;

        row.map(|r| r.try_get::<u64, _>("id").map_err(|e| column_error("id", e)))
            .transpose()
    }
}

fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, err),
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn find_latest(&self, number: &str) -> DomainResult<Option<VerificationRecord>> {
        let query = format!(
            "SELECT {} FROM {} WHERE number = ? ORDER BY created_at DESC LIMIT 1",
            VERIFICATION_COLUMNS, VERIFICATION_TABLE
        );

        let row = sqlx::query(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find verification: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn upsert(&self, record: &VerificationRecord) -> DomainResult<VerificationRecord> {
        let mut stored = record.clone();
        let present = record.present.map(|p| p.as_str());

        match self.find_latest_id(&record.number).await? {
            Some(id) => {
                // A refresh is a new snapshot, so created_at moves with it
                let query = format!(
                    "UPDATE {} SET prefix = ?, cic = ?, error = ?, imsi = ?, mcc = ?, mnc = ?, \
                     network = ?, ported = ?, present = ?, status = ?, status_message = ?, \
                     type = ?, trxid = ?, created_at = ?, updated_at = ? WHERE id = ?",
                    VERIFICATION_TABLE
                );

                sqlx::query(&query)
                    .bind(&record.prefix)
                    .bind(&record.cic)
                    .bind(record.error)
                    .bind(&record.imsi)
                    .bind(&record.mcc)
                    .bind(&record.mnc)
                    .bind(&record.network)
                    .bind(record.ported)
                    .bind(present)
                    .bind(record.status)
                    .bind(&record.status_message)
                    .bind(&record.number_type)
                    .bind(&record.trxid)
                    .bind(record.created_at)
                    .bind(record.updated_at)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        DomainError::storage(format!("Failed to update verification: {}", e))
                    })?;

                stored.id = Some(id);
            }
            None => {
                let query = format!(
                    "INSERT INTO {} (number, prefix, cic, error, imsi, mcc, mnc, network, \
                     ported, present, status, status_message, type, trxid, created_at, updated_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    VERIFICATION_TABLE
                );

                let result = sqlx::query(&query)
                    .bind(&record.number)
                    .bind(&record.prefix)
                    .bind(&record.cic)
                    .bind(record.error)
                    .bind(&record.imsi)
                    .bind(&record.mcc)
                    .bind(&record.mnc)
                    .bind(&record.network)
                    .bind(record.ported)
                    .bind(present)
                    .bind(record.status)
                    .bind(&record.status_message)
                    .bind(&record.number_type)
                    .bind(&record.trxid)
                    .bind(record.created_at)
                    .bind(record.updated_at)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        DomainError::storage(format!("Failed to insert verification: {}", e))
                    })?;

                stored.id = Some(result.last_insert_id());
            }
        }

        Ok(stored)
    }

    async fn delete_by_number(&self, number: &str) -> DomainResult<u64> {
        let query = format!("DELETE FROM {} WHERE number = ?", VERIFICATION_TABLE);

        let result = sqlx::query(&query)
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete verification: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn exists(&self, number: &str) -> DomainResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE number = ?) AS found",
            VERIFICATION_TABLE
        );

        let row = sqlx::query(&query)
            .bind(number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to check verification existence: {}", e))
            })?;

        let found: i64 = row.try_get("found").map_err(|e| column_error("found", e))?;
        Ok(found == 1)
    }
}
