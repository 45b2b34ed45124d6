//! Mock implementation of AccountDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRole};
use crate::errors::{DomainError, DomainResult};

use super::trait_::AccountDirectory;

/// Mock account directory for testing
pub struct MockAccountDirectory {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    pub should_fail: bool,
}

impl MockAccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }

    /// Shorthand for seeding an active account with an endpoint
    pub async fn insert_active(&self, id: Uuid, role: AccountRole, endpoint: &str) {
        self.insert(Account {
            id,
            role,
            is_active: true,
            channel_endpoint: Some(endpoint.to_string()),
        })
        .await;
    }
}

impl Default for MockAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn channel_endpoint(&self, person_id: Uuid) -> DomainResult<Option<String>> {
        if self.should_fail {
            return Err(DomainError::Storage {
                message: "account directory unavailable".to_string(),
            });
        }
        Ok(self
            .accounts
            .read()
            .await
            .get(&person_id)
            .and_then(|a| a.channel_endpoint.clone()))
    }

    async fn is_active(&self, person_id: Uuid) -> DomainResult<bool> {
        if self.should_fail {
            return Err(DomainError::Storage {
                message: "account directory unavailable".to_string(),
            });
        }
        Ok(self
            .accounts
            .read()
            .await
            .get(&person_id)
            .map(|a| a.is_active)
            .unwrap_or(false))
    }

    async fn list_active_by_role(&self, role: AccountRole) -> DomainResult<Vec<Uuid>> {
        if self.should_fail {
            return Err(DomainError::Storage {
                message: "account directory unavailable".to_string(),
            });
        }
        let accounts = self.accounts.read().await;
        let mut ids: Vec<Uuid> = accounts
            .values()
            .filter(|a| a.is_active && a.role == role)
            .map(|a| a.id)
            .collect();
        // Stable order keeps tests deterministic
        ids.sort();
        Ok(ids)
    }
}
