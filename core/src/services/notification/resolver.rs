//! Recipient resolver: maps a case-lifecycle event to the concrete set of
//! notification targets.

use std::collections::HashSet;
use std::sync::Arc;
use tracing;
use uuid::Uuid;

use crate::domain::entities::account::AccountRole;
use crate::domain::entities::case_record::CaseRecord;
use crate::domain::entities::notification::{
    BroadcastAudience, CaseEvent, NotificationTarget, TargetRole,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::account_directory::AccountDirectory;
use crate::repositories::case_repository::CaseRepository;

/// Output of one resolution: the targets plus the fresh case snapshot they
/// were derived from, so one dispatch reads the case exactly once.
/// Broadcast events are not case-bound and carry no snapshot.
#[derive(Debug, Clone)]
pub struct ResolvedTargets {
    pub case: Option<CaseRecord>,
    pub targets: Vec<NotificationTarget>,
}

/// Computes the (person, role) pairs that must be notified for one event.
///
/// The case record is read fresh on every call, never cached, so a
/// just-changed assignment is reflected immediately. Inactive accounts are
/// omitted; a missing channel endpoint is preserved on the target (the
/// dispatcher records it as skipped).
pub struct RecipientResolver<R: CaseRepository, D: AccountDirectory> {
    cases: Arc<R>,
    directory: Arc<D>,
}

impl<R: CaseRepository, D: AccountDirectory> Clone for RecipientResolver<R, D> {
    fn clone(&self) -> Self {
        Self {
            cases: Arc::clone(&self.cases),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<R: CaseRepository, D: AccountDirectory> RecipientResolver<R, D> {
    pub fn new(cases: Arc<R>, directory: Arc<D>) -> Self {
        Self { cases, directory }
    }

    /// Resolve the target set for an event on a case.
    ///
    /// Zero targets is a normal outcome (e.g. no officers assigned yet),
    /// not an error.
    pub async fn resolve(&self, case_id: i64, event: &CaseEvent) -> DomainResult<ResolvedTargets> {
        // Broadcasts select from the directory only; no case read
        if let CaseEvent::AdminBroadcast { audience, .. } = event {
            let targets = self.resolve_broadcast(audience).await?;
            return Ok(ResolvedTargets {
                case: None,
                targets,
            });
        }

        let case = self
            .cases
            .get_case(case_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("case {}", case_id),
            })?;

        // Role-inclusion table: the one place that decides who hears about
        // which event type
        let mut candidates: Vec<(Uuid, TargetRole)> = Vec::new();
        match event {
            CaseEvent::ReportFiled => {
                candidates.push((case.complainant_id, TargetRole::Complainant));
                for admin_id in self
                    .directory
                    .list_active_by_role(AccountRole::Admin)
                    .await?
                {
                    candidates.push((admin_id, TargetRole::Admin));
                }
            }
            CaseEvent::StatusChanged { .. } | CaseEvent::HearingScheduled { .. } => {
                candidates.push((case.complainant_id, TargetRole::Complainant));
                if let Some(respondent_id) = case.respondent_id {
                    candidates.push((respondent_id, TargetRole::Respondent));
                }
                for officer_id in &case.assigned_officer_ids {
                    candidates.push((*officer_id, TargetRole::AssignedOfficer));
                }
            }
            CaseEvent::OfficerAssigned { officer_ids } => {
                // Only the newly assigned officers; earlier assignees were
                // notified when their own assignment happened
                for officer_id in officer_ids {
                    candidates.push((*officer_id, TargetRole::AssignedOfficer));
                }
                candidates.push((case.complainant_id, TargetRole::Complainant));
            }
            CaseEvent::AdminBroadcast { .. } => unreachable!("handled above"),
        }

        let targets = self.build_targets(candidates).await?;

        tracing::debug!(
            case_id,
            event = event.type_tag(),
            target_count = targets.len(),
            "Resolved notification targets"
        );

        Ok(ResolvedTargets {
            case: Some(case),
            targets,
        })
    }

    async fn resolve_broadcast(
        &self,
        audience: &BroadcastAudience,
    ) -> DomainResult<Vec<NotificationTarget>> {
        let person_ids = match audience {
            BroadcastAudience::AllUsers => {
                self.directory.list_active_by_role(AccountRole::User).await?
            }
            BroadcastAudience::AllOfficers => {
                self.directory
                    .list_active_by_role(AccountRole::Officer)
                    .await?
            }
            BroadcastAudience::Specific(ids) => ids.clone(),
        };

        // Broadcast recipients are addressed in the Admin role: the message
        // is an administrative announcement, identical for every recipient
        let candidates = person_ids
            .into_iter()
            .map(|id| (id, TargetRole::Admin))
            .collect();
        self.build_targets(candidates).await
    }

    /// Dedup by (person, role), drop inactive accounts, attach endpoints.
    async fn build_targets(
        &self,
        candidates: Vec<(Uuid, TargetRole)>,
    ) -> DomainResult<Vec<NotificationTarget>> {
        let mut seen: HashSet<(Uuid, TargetRole)> = HashSet::new();
        let mut targets = Vec::new();

        for (person_id, role) in candidates {
            if !seen.insert((person_id, role)) {
                continue;
            }
            if !self.directory.is_active(person_id).await? {
                continue;
            }
            let endpoint = self.directory.channel_endpoint(person_id).await?;
            targets.push(NotificationTarget {
                person_id,
                role,
                endpoint,
            });
        }

        Ok(targets)
    }
}
