//! Notification fan-out value types.
//!
//! Event types and roles are closed enumerations: adding an event is one
//! edit to the role-inclusion table in the resolver and one row in the
//! composer, not a scatter of string literals across call sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::case_record::CaseStatus;

/// The capacity in which a person is notified for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRole {
    Complainant,
    Respondent,
    AssignedOfficer,
    Admin,
}

/// Audience selector for admin broadcasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastAudience {
    /// Every active citizen account
    AllUsers,
    /// Every active officer account
    AllOfficers,
    /// An explicit list of account ids
    Specific(Vec<Uuid>),
}

/// A case-lifecycle event that triggers a notification fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseEvent {
    /// A new report was filed
    ReportFiled,

    /// Case status transitioned
    StatusChanged {
        old_status: CaseStatus,
        new_status: CaseStatus,
    },

    /// Officers were assigned to the case. Carries only the *newly*
    /// assigned officers; previously assigned ones were notified when their
    /// own assignment happened.
    OfficerAssigned { officer_ids: Vec<Uuid> },

    /// A hearing was scheduled
    HearingScheduled {
        hearing_date: DateTime<Utc>,
        location: String,
    },

    /// Manual announcement from an admin to a selected audience
    AdminBroadcast {
        title: String,
        body: String,
        audience: BroadcastAudience,
    },
}

impl CaseEvent {
    /// Machine-readable tag carried in every structured payload so the
    /// receiving client can route without parsing the human-readable body
    pub fn type_tag(&self) -> &'static str {
        match self {
            CaseEvent::ReportFiled => "new_report",
            CaseEvent::StatusChanged { .. } => "status_update",
            CaseEvent::OfficerAssigned { .. } => "officer_assigned",
            CaseEvent::HearingScheduled { .. } => "hearing_scheduled",
            CaseEvent::AdminBroadcast { .. } => "announcement",
        }
    }
}

/// A (person, role) pair selected to receive one event, with the channel
/// endpoint their device registered. `endpoint: None` is a normal state
/// (the person never installed the app) and results in a skip, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    pub person_id: Uuid,
    pub role: TargetRole,
    pub endpoint: Option<String>,
}

/// Channel-agnostic composed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    pub body: String,
    /// Structured payload; always includes a `"type"` tag and, for
    /// case-bound events, the case identifiers
    pub payload: Value,
}

/// Terminal outcome of one delivery attempt. No retries happen at this
/// layer; retry policy, if any, belongs to the provider's own queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// Provider accepted the message
    Sent { message_id: String },
    /// Target had no registered channel endpoint
    Skipped,
    /// Provider rejected the message or the attempt timed out
    Failed { reason: String },
}

/// One per target per event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    pub target: NotificationTarget,
    pub outcome: DeliveryOutcome,
}

/// Summary of one fan-out. Callers treat the triggering business operation
/// as already committed regardless of what this report says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub case_id: i64,
    pub event_type: String,
    pub attempts: Vec<DeliveryAttempt>,
}

impl DeliveryReport {
    pub fn sent(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, DeliveryOutcome::Sent { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, DeliveryOutcome::Skipped))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, DeliveryOutcome::Failed { .. }))
            .count()
    }

    /// Outcome for a specific person, if that person was a target
    pub fn outcome_for(&self, person_id: Uuid) -> Option<&DeliveryOutcome> {
        self.attempts
            .iter()
            .find(|a| a.target.person_id == person_id)
            .map(|a| &a.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_tags() {
        assert_eq!(CaseEvent::ReportFiled.type_tag(), "new_report");
        assert_eq!(
            CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::UnderInvestigation,
            }
            .type_tag(),
            "status_update"
        );
        assert_eq!(
            CaseEvent::AdminBroadcast {
                title: "t".into(),
                body: "b".into(),
                audience: BroadcastAudience::AllUsers,
            }
            .type_tag(),
            "announcement"
        );
    }

    #[test]
    fn test_report_counts() {
        let target = |id: u128, outcome: DeliveryOutcome| DeliveryAttempt {
            target: NotificationTarget {
                person_id: Uuid::from_u128(id),
                role: TargetRole::Complainant,
                endpoint: None,
            },
            outcome,
        };

        let report = DeliveryReport {
            case_id: 42,
            event_type: "status_update".to_string(),
            attempts: vec![
                target(1, DeliveryOutcome::Sent { message_id: "m1".into() }),
                target(2, DeliveryOutcome::Skipped),
                target(
                    3,
                    DeliveryOutcome::Failed {
                        reason: "timeout".into(),
                    },
                ),
            ],
        };

        assert_eq!(report.sent(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.outcome_for(Uuid::from_u128(2)),
            Some(&DeliveryOutcome::Skipped)
        );
        assert_eq!(report.outcome_for(Uuid::from_u128(9)), None);
    }
}
