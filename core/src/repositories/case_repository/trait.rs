//! Read-only access to blotter case records.

use async_trait::async_trait;

use crate::domain::entities::case_record::CaseRecord;
use crate::errors::DomainResult;

/// Read-only case access used by the recipient resolver.
///
/// The resolver reads a fresh snapshot on every event, never a cached one,
/// so a just-changed assignment is reflected in the very next fan-out.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Fetch the current case record, or `None` if the case does not exist
    async fn get_case(&self, case_id: i64) -> DomainResult<Option<CaseRecord>>;
}
