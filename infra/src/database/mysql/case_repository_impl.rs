//! MySQL implementation of the CaseRepository trait.
//!
//! The `blotter_cases` table carries up to two officer slots
//! (`assigned_officer_id`, `second_officer_id`); the entity flattens the
//! occupied slots into its officer list.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use bms_core::domain::entities::case_record::{CaseRecord, CaseStatus};
use bms_core::errors::{DomainError, DomainResult};
use bms_core::repositories::case_repository::CaseRepository;

use crate::storage_error;

/// MySQL-backed case repository
pub struct MySqlCaseRepository {
    pool: MySqlPool,
}

impl MySqlCaseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID in {}: {}", column, e),
        })
    }

    fn row_to_case(row: &sqlx::mysql::MySqlRow) -> Result<CaseRecord, DomainError> {
        let complainant_id: String =
            row.try_get("complainant_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get complainant_id: {}", e),
            })?;
        let respondent_id: Option<String> =
            row.try_get("respondent_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get respondent_id: {}", e),
            })?;
        let first_officer: Option<String> =
            row.try_get("assigned_officer_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get assigned_officer_id: {}", e),
                })?;
        let second_officer: Option<String> =
            row.try_get("second_officer_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get second_officer_id: {}", e),
                })?;
        let status: String = row.try_get("status").map_err(|e| DomainError::Internal {
            message: format!("Failed to get status: {}", e),
        })?;

        let mut assigned_officer_ids = Vec::new();
        if let Some(id) = first_officer {
            assigned_officer_ids.push(Self::parse_uuid("assigned_officer_id", &id)?);
        }
        if let Some(id) = second_officer {
            assigned_officer_ids.push(Self::parse_uuid("second_officer_id", &id)?);
        }

        Ok(CaseRecord {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            case_number: row.try_get("case_number").map_err(|e| DomainError::Internal {
                message: format!("Failed to get case_number: {}", e),
            })?,
            complainant_id: Self::parse_uuid("complainant_id", &complainant_id)?,
            respondent_id: respondent_id
                .map(|id| Self::parse_uuid("respondent_id", &id))
                .transpose()?,
            assigned_officer_ids,
            status: CaseStatus::from_str(&status).map_err(|_| DomainError::Internal {
                message: format!("Unknown case status: {}", status),
            })?,
        })
    }
}

#[async_trait]
impl CaseRepository for MySqlCaseRepository {
    async fn get_case(&self, case_id: i64) -> DomainResult<Option<CaseRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, case_number, complainant_id, respondent_id,
                   assigned_officer_id, second_officer_id, status
            FROM blotter_cases
            WHERE id = ?
            "#,
        )
        .bind(case_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to query case", e))?;

        row.as_ref().map(Self::row_to_case).transpose()
    }
}
