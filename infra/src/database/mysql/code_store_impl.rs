//! MySQL implementation of the CodeStore trait.
//!
//! Rows in `verification_codes` are append-only: supersession and
//! consumption stamp timestamps, nothing is ever deleted, so the full
//! issuance history stays queryable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bms_core::domain::entities::verification_code::VerificationCode;
use bms_core::errors::{DomainError, DomainResult};
use bms_core::repositories::code_store::{CodeStore, ConsumeOutcome};

use crate::storage_error;

/// MySQL-backed verification code store
pub struct MySqlCodeStore {
    pool: MySqlPool,
}

impl MySqlCodeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid code UUID: {}", e),
            })?,
            recipient_key: row
                .try_get("recipient_key")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get recipient_key: {}", e),
                })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get issued_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            consumed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("consumed_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get consumed_at: {}", e),
                })?,
            superseded_at: row
                .try_get::<Option<DateTime<Utc>>, _>("superseded_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get superseded_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl CodeStore for MySqlCodeStore {
    async fn put(&self, code: &VerificationCode) -> DomainResult<()> {
        // Supersede-then-insert in one transaction so readers never see two
        // active codes for the same key
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            UPDATE verification_codes
            SET superseded_at = ?
            WHERE recipient_key = ?
              AND consumed_at IS NULL
              AND superseded_at IS NULL
            "#,
        )
        .bind(Utc::now())
        .bind(&code.recipient_key)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to supersede prior codes", e))?;

        sqlx::query(
            r#"
            INSERT INTO verification_codes (
                id, recipient_key, code, issued_at, expires_at,
                consumed_at, superseded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.id.to_string())
        .bind(&code.recipient_key)
        .bind(&code.code)
        .bind(code.issued_at)
        .bind(code.expires_at)
        .bind(code.consumed_at)
        .bind(code.superseded_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to insert verification code", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit code insert", e))?;

        Ok(())
    }

    async fn latest_for_recipient(
        &self,
        recipient_key: &str,
    ) -> DomainResult<Option<VerificationCode>> {
        let row = sqlx::query(
            r#"
            SELECT id, recipient_key, code, issued_at, expires_at,
                   consumed_at, superseded_at
            FROM verification_codes
            WHERE recipient_key = ?
            ORDER BY issued_at DESC
            LIMIT 1
            "#,
        )
        .bind(recipient_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to query latest code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn consume(&self, code_id: Uuid) -> DomainResult<ConsumeOutcome> {
        // Conditional write: only the caller whose UPDATE matches the
        // unconsumed row wins; everyone else sees zero rows affected
        let result = sqlx::query(
            r#"
            UPDATE verification_codes
            SET consumed_at = ?
            WHERE id = ? AND consumed_at IS NULL
            "#,
        )
        .bind(Utc::now())
        .bind(code_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to consume code", e))?;

        if result.rows_affected() == 1 {
            return Ok(ConsumeOutcome::Consumed);
        }

        // Zero rows: either already consumed or the id does not exist
        let exists_row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM verification_codes WHERE id = ?) AS found",
        )
        .bind(code_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to check code existence", e))?;

        let found: i8 = exists_row.try_get("found").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        if found == 1 {
            Ok(ConsumeOutcome::AlreadyConsumed)
        } else {
            Err(DomainError::NotFound {
                resource: format!("verification code {}", code_id),
            })
        }
    }

    async fn peek_active(&self, recipient_key: &str) -> DomainResult<Option<VerificationCode>> {
        let row = sqlx::query(
            r#"
            SELECT id, recipient_key, code, issued_at, expires_at,
                   consumed_at, superseded_at
            FROM verification_codes
            WHERE recipient_key = ?
              AND consumed_at IS NULL
              AND superseded_at IS NULL
              AND expires_at > ?
            ORDER BY issued_at DESC
            LIMIT 1
            "#,
        )
        .bind(recipient_key)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to query active code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }
}
