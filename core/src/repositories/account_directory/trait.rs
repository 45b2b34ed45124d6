//! Account directory: channel endpoints, active flags and role enumeration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::AccountRole;
use crate::errors::DomainResult;

/// Read-only account lookups used by the recipient resolver.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// The channel endpoint the person's device registered, if any.
    /// `None` is a normal state, not an error.
    async fn channel_endpoint(&self, person_id: Uuid) -> DomainResult<Option<String>>;

    /// Whether the account is active (not terminated/suspended)
    async fn is_active(&self, person_id: Uuid) -> DomainResult<bool>;

    /// Ids of all active accounts holding the given role. Used for admin
    /// alerts on new reports and for broadcast audiences.
    async fn list_active_by_role(&self, role: AccountRole) -> DomainResult<Vec<Uuid>>;
}
