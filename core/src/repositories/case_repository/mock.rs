//! Mock implementation of CaseRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::case_record::CaseRecord;
use crate::errors::{DomainError, DomainResult};

use super::trait_::CaseRepository;

/// Mock case repository for testing
pub struct MockCaseRepository {
    cases: Arc<RwLock<HashMap<i64, CaseRecord>>>,
    /// When set, every call fails with a storage error
    pub should_fail: bool,
}

impl MockCaseRepository {
    pub fn new() -> Self {
        Self {
            cases: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            cases: Arc::new(RwLock::new(HashMap::new())),
            should_fail: true,
        }
    }

    pub async fn insert(&self, case: CaseRecord) {
        self.cases.write().await.insert(case.id, case);
    }
}

impl Default for MockCaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaseRepository for MockCaseRepository {
    async fn get_case(&self, case_id: i64) -> DomainResult<Option<CaseRecord>> {
        if self.should_fail {
            return Err(DomainError::Storage {
                message: "case repository unavailable".to_string(),
            });
        }
        Ok(self.cases.read().await.get(&case_id).cloned())
    }
}
