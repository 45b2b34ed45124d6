//! Unit tests for the code issuer

use std::sync::Arc;

use crate::domain::entities::verification_code::CODE_LENGTH;
use crate::errors::DomainError;
use crate::repositories::code_store::{CodeStore, MemoryCodeStore};
use crate::services::verification::{CodeIssuer, VerificationConfig};

fn issuer(store: Arc<MemoryCodeStore>) -> CodeIssuer<MemoryCodeStore> {
    CodeIssuer::new(store, VerificationConfig::default())
}

#[tokio::test]
async fn test_issue_new_code() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store.clone());

    let issued = issuer.issue_or_resend("a@x.com").await.unwrap();

    assert_eq!(issued.code.len(), CODE_LENGTH);
    assert!(!issued.reused);

    // The issued code is the active one
    let active = store.peek_active("a@x.com").await.unwrap().unwrap();
    assert_eq!(active.code, issued.code);
    assert_eq!(active.expires_at, issued.expires_at);
}

#[tokio::test]
async fn test_resend_reuses_active_code_and_expiry() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store.clone());

    let first = issuer.issue_or_resend("a@x.com").await.unwrap();
    let second = issuer.issue_or_resend("a@x.com").await.unwrap();

    // Same code, same original expiry: resend never extends the window
    assert_eq!(second.code, first.code);
    assert_eq!(second.expires_at, first.expires_at);
    assert!(second.reused);

    // And no extra row was written
    assert_eq!(store.row_count("a@x.com").await, 1);
}

#[tokio::test]
async fn test_single_active_code_across_repeated_issues() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store.clone());

    for _ in 0..5 {
        let issued = issuer.issue_or_resend("a@x.com").await.unwrap();
        let active = store.peek_active("a@x.com").await.unwrap().unwrap();
        assert_eq!(active.code, issued.code);
    }
}

#[tokio::test]
async fn test_fresh_code_after_consumption() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store.clone());

    let first = issuer.issue_or_resend("a@x.com").await.unwrap();
    let row = store.peek_active("a@x.com").await.unwrap().unwrap();
    store.consume(row.id).await.unwrap();

    let second = issuer.issue_or_resend("a@x.com").await.unwrap();
    assert!(!second.reused);
    assert_ne!(second.expires_at, first.expires_at);
    assert_eq!(store.row_count("a@x.com").await, 2);
}

#[tokio::test]
async fn test_concurrent_issues_leave_one_active_code() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = Arc::new(issuer(store.clone()));

    let (r1, r2) = tokio::join!(
        issuer.issue_or_resend("a@x.com"),
        issuer.issue_or_resend("a@x.com")
    );
    let (c1, c2) = (r1.unwrap(), r2.unwrap());

    // Regardless of interleaving, exactly one code is active afterwards and
    // it is one of the two returned
    let active = store.peek_active("a@x.com").await.unwrap().unwrap();
    assert!(active.code == c1.code || active.code == c2.code);
}

#[tokio::test]
async fn test_invalid_recipient_key_is_rejected() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store);

    let err = issuer.issue_or_resend("not-an-email").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_recipient_key_is_normalized() {
    let store = Arc::new(MemoryCodeStore::new());
    let issuer = issuer(store.clone());

    let first = issuer.issue_or_resend("A@X.Com").await.unwrap();
    let second = issuer.issue_or_resend("  a@x.com ").await.unwrap();

    assert_eq!(second.code, first.code);
    assert!(second.reused);
}
