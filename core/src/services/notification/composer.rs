//! Message composer: pure function from (event, role, case) to a
//! channel-agnostic message.
//!
//! No I/O, no clocks, no randomness: the same inputs always produce the
//! same message, which makes the composer trivially unit-testable and safe
//! to call once per target.

use serde_json::json;

use crate::domain::entities::case_record::CaseRecord;
use crate::domain::entities::notification::{CaseEvent, Message, TargetRole};

/// Composes the per-role message for an event
#[derive(Debug, Clone, Default)]
pub struct MessageComposer;

impl MessageComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the message one target receives.
    ///
    /// `case` is present for every case-bound event; broadcasts carry their
    /// own title and body and no case reference. The structured payload
    /// always includes a machine-readable `"type"` tag and, where a case is
    /// involved, its identifiers; the receiving client routes on those
    /// instead of parsing the body.
    pub fn compose(&self, event: &CaseEvent, role: TargetRole, case: Option<&CaseRecord>) -> Message {
        let case_number = case.map(|c| c.case_number.as_str()).unwrap_or("?");

        let (title, body) = match (event, role) {
            (CaseEvent::ReportFiled, TargetRole::Complainant) => (
                "Case Filed Successfully".to_string(),
                format!(
                    "Your case #{} has been filed and is under review",
                    case_number
                ),
            ),
            (CaseEvent::ReportFiled, _) => (
                "New Case Filed".to_string(),
                format!("Case #{} has been filed and awaits review", case_number),
            ),

            (CaseEvent::StatusChanged { old_status, new_status }, TargetRole::AssignedOfficer) => (
                "Status Update".to_string(),
                format!(
                    "Case #{} status changed from {} to {}",
                    case_number, old_status, new_status
                ),
            ),
            (CaseEvent::StatusChanged { new_status, .. }, _) => (
                "Status Update".to_string(),
                format!("Case #{} is now {}", case_number, new_status),
            ),

            (CaseEvent::OfficerAssigned { .. }, TargetRole::AssignedOfficer) => (
                "New Case Assigned".to_string(),
                format!("Case #{} has been assigned to you", case_number),
            ),
            (CaseEvent::OfficerAssigned { .. }, _) => (
                "Officer Assigned".to_string(),
                format!(
                    "An officer has been assigned to your case #{}",
                    case_number
                ),
            ),

            (CaseEvent::HearingScheduled { hearing_date, location }, TargetRole::AssignedOfficer) => (
                "Hearing Scheduled".to_string(),
                format!(
                    "Hearing for case #{} on {} at {}",
                    case_number,
                    hearing_date.format("%Y-%m-%d %H:%M"),
                    location
                ),
            ),
            (CaseEvent::HearingScheduled { hearing_date, location }, _) => (
                "Hearing Scheduled".to_string(),
                format!(
                    "Your hearing for case #{} is on {} at {}",
                    case_number,
                    hearing_date.format("%Y-%m-%d %H:%M"),
                    location
                ),
            ),

            (CaseEvent::AdminBroadcast { title, body, .. }, _) => (title.clone(), body.clone()),
        };

        Message {
            title,
            body,
            payload: Self::payload(event, case),
        }
    }

    fn payload(event: &CaseEvent, case: Option<&CaseRecord>) -> serde_json::Value {
        let mut payload = json!({ "type": event.type_tag() });
        let map = payload.as_object_mut().unwrap();

        if let Some(case) = case {
            map.insert("case_id".to_string(), json!(case.id));
            map.insert("case_number".to_string(), json!(case.case_number));
        }

        match event {
            CaseEvent::StatusChanged { old_status, new_status } => {
                map.insert("old_status".to_string(), json!(old_status.as_str()));
                map.insert("new_status".to_string(), json!(new_status.as_str()));
            }
            CaseEvent::HearingScheduled { hearing_date, location } => {
                map.insert(
                    "hearing_date".to_string(),
                    json!(hearing_date.to_rfc3339()),
                );
                map.insert("location".to_string(), json!(location));
            }
            _ => {}
        }

        payload
    }
}
