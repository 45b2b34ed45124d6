//! In-memory implementation of the code store.
//!
//! Used by unit tests and local development. A single lock around the whole
//! map makes supersede-then-insert and conditional consume atomic, which is
//! the same contract the MySQL implementation provides with a transaction
//! and a conditional UPDATE.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult};

use super::trait_::{CodeStore, ConsumeOutcome};

/// In-memory code store keeping the full (never-deleted) row history per
/// recipient key
pub struct MemoryCodeStore {
    rows: Arc<RwLock<HashMap<String, Vec<VerificationCode>>>>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Total number of rows ever stored for a key, consumed and superseded
    /// rows included. Handy for audit-trail assertions in tests.
    pub async fn row_count(&self, recipient_key: &str) -> usize {
        self.rows
            .read()
            .await
            .get(recipient_key)
            .map(|v| v.len())
            .unwrap_or(0)
    }
}

impl Default for MemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn put(&self, code: &VerificationCode) -> DomainResult<()> {
        let mut rows = self.rows.write().await;
        let now = Utc::now();
        let entry = rows.entry(code.recipient_key.clone()).or_default();

        // Supersede whatever is still active, then insert; both under the
        // same write lock so concurrent puts collapse to one winner
        for row in entry.iter_mut() {
            if row.consumed_at.is_none() && row.superseded_at.is_none() {
                row.superseded_at = Some(now);
            }
        }
        entry.push(code.clone());

        Ok(())
    }

    async fn latest_for_recipient(
        &self,
        recipient_key: &str,
    ) -> DomainResult<Option<VerificationCode>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(recipient_key)
            .and_then(|entry| entry.last())
            .cloned())
    }

    async fn consume(&self, code_id: Uuid) -> DomainResult<ConsumeOutcome> {
        let mut rows = self.rows.write().await;

        for entry in rows.values_mut() {
            if let Some(row) = entry.iter_mut().find(|r| r.id == code_id) {
                return Ok(if row.consumed_at.is_none() {
                    row.consumed_at = Some(Utc::now());
                    ConsumeOutcome::Consumed
                } else {
                    ConsumeOutcome::AlreadyConsumed
                });
            }
        }

        Err(DomainError::NotFound {
            resource: format!("verification code {}", code_id),
        })
    }

    async fn peek_active(&self, recipient_key: &str) -> DomainResult<Option<VerificationCode>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(recipient_key)
            .and_then(|entry| entry.iter().rev().find(|r| r.is_active()))
            .cloned())
    }
}
