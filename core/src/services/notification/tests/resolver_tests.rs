//! Unit tests for the recipient resolver

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::case_record::{CaseRecord, CaseStatus};
use crate::domain::entities::notification::{BroadcastAudience, CaseEvent, TargetRole};
use crate::errors::DomainError;
use crate::repositories::account_directory::MockAccountDirectory;
use crate::repositories::case_repository::MockCaseRepository;
use crate::services::notification::RecipientResolver;

fn person(id: u128) -> Uuid {
    Uuid::from_u128(id)
}

fn case_42(respondent: Option<Uuid>, officers: Vec<Uuid>) -> CaseRecord {
    CaseRecord {
        id: 42,
        case_number: "BLT-2025-0042".to_string(),
        complainant_id: person(1),
        respondent_id: respondent,
        assigned_officer_ids: officers,
        status: CaseStatus::UnderInvestigation,
    }
}

async fn setup(
    case: CaseRecord,
) -> (
    RecipientResolver<MockCaseRepository, MockAccountDirectory>,
    Arc<MockAccountDirectory>,
) {
    let cases = Arc::new(MockCaseRepository::new());
    cases.insert(case).await;
    let directory = Arc::new(MockAccountDirectory::new());
    (
        RecipientResolver::new(cases, directory.clone()),
        directory,
    )
}

#[tokio::test]
async fn test_status_change_resolves_complainant_and_officers() {
    // Case #42: complainant U1, no respondent, officers O1 and O2
    let (u1, o1, o2) = (person(1), person(11), person(12));
    let (resolver, directory) = setup(case_42(None, vec![o1, o2])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(o1, AccountRole::Officer, "ep-o1").await;
    directory.insert_active(o2, AccountRole::Officer, "ep-o2").await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::UnderInvestigation,
            },
        )
        .await
        .unwrap();

    // Exactly {U1, O1, O2}: three targets, no duplicates, no respondent
    let mut ids: Vec<Uuid> = resolved.targets.iter().map(|t| t.person_id).collect();
    ids.sort();
    let mut expected = vec![u1, o1, o2];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(resolved
        .targets
        .iter()
        .all(|t| t.role != TargetRole::Respondent));
}

#[tokio::test]
async fn test_officer_assignment_notifies_only_new_officers() {
    // Assignment grew from [O1] to [O1, O2]; the event carries only O2
    let (u1, o1, o2) = (person(1), person(11), person(12));
    let (resolver, directory) = setup(case_42(None, vec![o1, o2])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(o1, AccountRole::Officer, "ep-o1").await;
    directory.insert_active(o2, AccountRole::Officer, "ep-o2").await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::OfficerAssigned {
                officer_ids: vec![o2],
            },
        )
        .await
        .unwrap();

    // O1 was already notified at first assignment; only {O2, U1} here
    let mut ids: Vec<Uuid> = resolved.targets.iter().map(|t| t.person_id).collect();
    ids.sort();
    let mut expected = vec![u1, o2];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_hearing_includes_respondent_when_present() {
    let (u1, u2, o1) = (person(1), person(2), person(11));
    let (resolver, directory) = setup(case_42(Some(u2), vec![o1])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(u2, AccountRole::User, "ep-u2").await;
    directory.insert_active(o1, AccountRole::Officer, "ep-o1").await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::HearingScheduled {
                hearing_date: chrono::Utc::now(),
                location: "Barangay Hall".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(resolved.targets.len(), 3);
    assert!(resolved
        .targets
        .iter()
        .any(|t| t.person_id == u2 && t.role == TargetRole::Respondent));
}

#[tokio::test]
async fn test_report_filed_alerts_active_admins() {
    let (u1, a1, a2) = (person(1), person(21), person(22));
    let (resolver, directory) = setup(case_42(None, vec![])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(a1, AccountRole::Admin, "ep-a1").await;
    // a2 is an inactive admin and must be omitted
    directory
        .insert(Account {
            id: a2,
            role: AccountRole::Admin,
            is_active: false,
            channel_endpoint: Some("ep-a2".to_string()),
        })
        .await;

    let resolved = resolver.resolve(42, &CaseEvent::ReportFiled).await.unwrap();

    let mut ids: Vec<Uuid> = resolved.targets.iter().map(|t| t.person_id).collect();
    ids.sort();
    let mut expected = vec![u1, a1];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_duplicate_person_role_pairs_are_deduplicated() {
    // Complainant is also an assigned officer somehow listed twice
    let (u1, o1) = (person(1), person(11));
    let (resolver, directory) = setup(case_42(None, vec![o1, o1])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(o1, AccountRole::Officer, "ep-o1").await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::Resolved,
            },
        )
        .await
        .unwrap();

    assert_eq!(resolved.targets.len(), 2);
}

#[tokio::test]
async fn test_inactive_account_is_omitted() {
    let (u1, o1) = (person(1), person(11));
    let (resolver, directory) = setup(case_42(None, vec![o1])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory
        .insert(Account {
            id: o1,
            role: AccountRole::Officer,
            is_active: false,
            channel_endpoint: Some("ep-o1".to_string()),
        })
        .await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::Closed,
            },
        )
        .await
        .unwrap();

    assert_eq!(resolved.targets.len(), 1);
    assert_eq!(resolved.targets[0].person_id, u1);
}

#[tokio::test]
async fn test_missing_endpoint_is_kept_not_dropped() {
    let u1 = person(1);
    let (resolver, directory) = setup(case_42(None, vec![])).await;
    directory
        .insert(Account {
            id: u1,
            role: AccountRole::User,
            is_active: true,
            channel_endpoint: None,
        })
        .await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::Dismissed,
            },
        )
        .await
        .unwrap();

    // The target survives resolution; the dispatcher records the skip
    assert_eq!(resolved.targets.len(), 1);
    assert!(resolved.targets[0].endpoint.is_none());
}

#[tokio::test]
async fn test_broadcast_selects_by_audience() {
    let (u1, u2, o1, a1) = (person(1), person(2), person(11), person(21));
    let (resolver, directory) = setup(case_42(None, vec![])).await;
    directory.insert_active(u1, AccountRole::User, "ep-u1").await;
    directory.insert_active(u2, AccountRole::User, "ep-u2").await;
    directory.insert_active(o1, AccountRole::Officer, "ep-o1").await;
    directory.insert_active(a1, AccountRole::Admin, "ep-a1").await;

    let broadcast = |audience| CaseEvent::AdminBroadcast {
        title: "Advisory".to_string(),
        body: "Office closed on Friday".to_string(),
        audience,
    };

    let users = resolver
        .resolve(0, &broadcast(BroadcastAudience::AllUsers))
        .await
        .unwrap();
    assert_eq!(users.targets.len(), 2);
    assert!(users.case.is_none());

    let officers = resolver
        .resolve(0, &broadcast(BroadcastAudience::AllOfficers))
        .await
        .unwrap();
    assert_eq!(officers.targets.len(), 1);
    assert_eq!(officers.targets[0].person_id, o1);

    let specific = resolver
        .resolve(0, &broadcast(BroadcastAudience::Specific(vec![u1, a1])))
        .await
        .unwrap();
    assert_eq!(specific.targets.len(), 2);
}

#[tokio::test]
async fn test_unknown_case_is_not_found() {
    let (resolver, _) = setup(case_42(None, vec![])).await;

    let err = resolver
        .resolve(
            999,
            &CaseEvent::ReportFiled,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let cases = Arc::new(MockCaseRepository::failing());
    let directory = Arc::new(MockAccountDirectory::new());
    let resolver = RecipientResolver::new(cases, directory);

    let err = resolver
        .resolve(42, &CaseEvent::ReportFiled)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_zero_targets_is_not_an_error() {
    // Complainant account terminated, nobody else on the case
    let (resolver, directory) = setup(case_42(None, vec![])).await;
    directory
        .insert(Account {
            id: person(1),
            role: AccountRole::User,
            is_active: false,
            channel_endpoint: None,
        })
        .await;

    let resolved = resolver
        .resolve(
            42,
            &CaseEvent::StatusChanged {
                old_status: CaseStatus::Pending,
                new_status: CaseStatus::Closed,
            },
        )
        .await
        .unwrap();
    assert!(resolved.targets.is_empty());
}
