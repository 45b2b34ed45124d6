//! MySQL implementation of the AccountDirectory trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bms_core::domain::entities::account::AccountRole;
use bms_core::errors::{DomainError, DomainResult};
use bms_core::repositories::account_directory::AccountDirectory;

use crate::storage_error;

/// MySQL-backed account directory
pub struct MySqlAccountDirectory {
    pool: MySqlPool,
}

impl MySqlAccountDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for MySqlAccountDirectory {
    async fn channel_endpoint(&self, person_id: Uuid) -> DomainResult<Option<String>> {
        let row = sqlx::query("SELECT channel_endpoint FROM accounts WHERE id = ?")
            .bind(person_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to query channel endpoint", e))?;

        match row {
            None => Ok(None),
            Some(row) => row
                .try_get::<Option<String>, _>("channel_endpoint")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get channel_endpoint: {}", e),
                }),
        }
    }

    async fn is_active(&self, person_id: Uuid) -> DomainResult<bool> {
        let row = sqlx::query("SELECT is_active FROM accounts WHERE id = ?")
            .bind(person_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to query account state", e))?;

        // Unknown accounts are treated as inactive, not as an error
        match row {
            None => Ok(false),
            Some(row) => row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            }),
        }
    }

    async fn list_active_by_role(&self, role: AccountRole) -> DomainResult<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT id FROM accounts WHERE role = ? AND is_active = TRUE ORDER BY id",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list accounts by role", e))?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get id: {}", e),
                })?;
                Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                    message: format!("Invalid account UUID: {}", e),
                })
            })
            .collect()
    }
}
