//! Unit tests for the message composer

use chrono::TimeZone;
use uuid::Uuid;

use crate::domain::entities::case_record::{CaseRecord, CaseStatus};
use crate::domain::entities::notification::{BroadcastAudience, CaseEvent, TargetRole};
use crate::services::notification::MessageComposer;

fn sample_case() -> CaseRecord {
    CaseRecord {
        id: 42,
        case_number: "BLT-2025-0042".to_string(),
        complainant_id: Uuid::from_u128(1),
        respondent_id: None,
        assigned_officer_ids: vec![Uuid::from_u128(11)],
        status: CaseStatus::UnderInvestigation,
    }
}

#[test]
fn test_compose_is_deterministic() {
    let composer = MessageComposer::new();
    let case = sample_case();
    let event = CaseEvent::ReportFiled;

    let first = composer.compose(&event, TargetRole::Complainant, Some(&case));
    let second = composer.compose(&event, TargetRole::Complainant, Some(&case));
    assert_eq!(first, second);
}

#[test]
fn test_report_filed_wording_differs_by_role() {
    let composer = MessageComposer::new();
    let case = sample_case();

    let to_complainant =
        composer.compose(&CaseEvent::ReportFiled, TargetRole::Complainant, Some(&case));
    let to_admin = composer.compose(&CaseEvent::ReportFiled, TargetRole::Admin, Some(&case));

    assert_eq!(to_complainant.title, "Case Filed Successfully");
    assert_eq!(to_admin.title, "New Case Filed");
    assert!(to_complainant.body.contains("BLT-2025-0042"));
    assert_eq!(to_complainant.payload["type"], "new_report");
    assert_eq!(to_complainant.payload["case_id"], 42);
    assert_eq!(to_complainant.payload["case_number"], "BLT-2025-0042");
}

#[test]
fn test_status_change_officer_sees_transition() {
    let composer = MessageComposer::new();
    let case = sample_case();
    let event = CaseEvent::StatusChanged {
        old_status: CaseStatus::Pending,
        new_status: CaseStatus::UnderInvestigation,
    };

    let to_officer = composer.compose(&event, TargetRole::AssignedOfficer, Some(&case));
    let to_complainant = composer.compose(&event, TargetRole::Complainant, Some(&case));

    // Officers get the full transition, parties only the new state
    assert!(to_officer.body.contains("from Pending to Under Investigation"));
    assert!(to_complainant.body.contains("is now Under Investigation"));
    assert_eq!(to_officer.payload["old_status"], "Pending");
    assert_eq!(to_officer.payload["new_status"], "Under Investigation");
    assert_eq!(to_officer.payload["type"], "status_update");
}

#[test]
fn test_officer_assignment_wording() {
    let composer = MessageComposer::new();
    let case = sample_case();
    let event = CaseEvent::OfficerAssigned {
        officer_ids: vec![Uuid::from_u128(11)],
    };

    let to_officer = composer.compose(&event, TargetRole::AssignedOfficer, Some(&case));
    let to_complainant = composer.compose(&event, TargetRole::Complainant, Some(&case));

    assert_eq!(to_officer.title, "New Case Assigned");
    assert!(to_officer.body.contains("assigned to you"));
    assert_eq!(to_complainant.title, "Officer Assigned");
}

#[test]
fn test_hearing_payload_carries_schedule() {
    let composer = MessageComposer::new();
    let case = sample_case();
    let hearing_date = chrono::Utc.with_ymd_and_hms(2025, 9, 15, 14, 0, 0).unwrap();
    let event = CaseEvent::HearingScheduled {
        hearing_date,
        location: "Barangay Hall".to_string(),
    };

    let message = composer.compose(&event, TargetRole::Respondent, Some(&case));

    assert_eq!(message.title, "Hearing Scheduled");
    assert!(message.body.contains("2025-09-15 14:00"));
    assert!(message.body.contains("Barangay Hall"));
    assert_eq!(message.payload["type"], "hearing_scheduled");
    assert_eq!(message.payload["hearing_date"], hearing_date.to_rfc3339());
    assert_eq!(message.payload["location"], "Barangay Hall");
}

#[test]
fn test_broadcast_passes_title_and_body_through() {
    let composer = MessageComposer::new();
    let event = CaseEvent::AdminBroadcast {
        title: "Advisory".to_string(),
        body: "Office closed on Friday".to_string(),
        audience: BroadcastAudience::AllUsers,
    };

    let message = composer.compose(&event, TargetRole::Admin, None);

    assert_eq!(message.title, "Advisory");
    assert_eq!(message.body, "Office closed on Friday");
    assert_eq!(message.payload["type"], "announcement");
    // No case is bound, so no case identifiers in the payload
    assert!(message.payload.get("case_id").is_none());
}
