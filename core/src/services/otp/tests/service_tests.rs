//! Unit tests for the OTP service

use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::errors::{DomainError, ValidationError};
use crate::services::otp::{
    ManualClock, OtpService, OtpServiceConfig, OtpStoreTrait, VerifyOutcome, OTP_MAIL_SUBJECT,
};

use super::mocks::{FixedOtpGenerator, MockMailService, MockOtpStore, SequenceOtpGenerator};

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

struct Harness {
    mail: Arc<MockMailService>,
    store: Arc<MockOtpStore>,
    clock: Arc<ManualClock>,
    service: OtpService<MockMailService, MockOtpStore>,
}

fn harness_with(
    mail: MockMailService,
    store: MockOtpStore,
    config: OtpServiceConfig,
    code: &'static str,
) -> Harness {
    let mail = Arc::new(mail);
    let store = Arc::new(store);
    let clock = Arc::new(ManualClock::new(start()));
    let service = OtpService::new(mail.clone(), store.clone(), config)
        .with_generator(Arc::new(FixedOtpGenerator(code)))
        .with_clock(clock.clone());
    Harness {
        mail,
        store,
        clock,
        service,
    }
}

fn harness(code: &'static str) -> Harness {
    harness_with(
        MockMailService::new(false),
        MockOtpStore::new(),
        OtpServiceConfig::default(),
        code,
    )
}

#[tokio::test]
async fn test_issue_sends_and_stores() {
    let h = harness("4213");

    let result = h.service.issue("a@x.com").await.unwrap();

    assert_eq!(result.email, "a@x.com");
    assert_eq!(result.issued_at, start());
    assert_eq!(result.expires_at, start() + Duration::minutes(5));
    assert!(result.message_id.starts_with("mock-msg-"));

    let mail = h.mail.last_sent().unwrap();
    assert_eq!(mail.to, "a@x.com");
    assert_eq!(mail.subject, OTP_MAIL_SUBJECT);
    assert_eq!(mail.body, "Your OTP is: 4213");

    let stored = h.store.records.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "a@x.com");
    assert_eq!(stored[0].code, "4213");
    assert_eq!(stored[0].issued_at, start());
}

#[tokio::test]
async fn test_issue_then_verify_immediately() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    let outcome = h.service.verify("a@x.com", "4213").await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_issue_rejects_missing_email() {
    let h = harness("4213");

    for email in ["", "   "] {
        match h.service.issue(email).await {
            Err(DomainError::ValidationErr(ValidationError::RequiredField { field })) => {
                assert_eq!(field, "email");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    assert_eq!(h.mail.sent_count(), 0);
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_delivery_failure_persists_nothing() {
    let h = harness_with(
        MockMailService::new(true),
        MockOtpStore::new(),
        OtpServiceConfig::default(),
        "4213",
    );

    let result = h.service.issue("a@x.com").await;
    assert!(matches!(result, Err(DomainError::Delivery { .. })));
    assert_eq!(h.store.len(), 0);

    let outcome = h.service.verify("a@x.com", "4213").await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Rejected);
}

#[tokio::test]
async fn test_storage_failure_after_delivery() {
    let h = harness_with(
        MockMailService::new(false),
        MockOtpStore::failing_put(),
        OtpServiceConfig::default(),
        "4213",
    );

    let result = h.service.issue("a@x.com").await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));

    // The mail already went out but its code can never verify
    assert_eq!(h.mail.last_code_for("a@x.com"), Some("4213".to_string()));
    let outcome = h.service.verify("a@x.com", "4213").await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Rejected);
}

#[tokio::test]
async fn test_verify_within_window() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    h.clock.advance(Duration::seconds(10));
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Verified
    );

    h.clock.set(start() + Duration::seconds(299));
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test]
async fn test_verify_after_expiry_is_rejected() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    h.clock.set(start() + Duration::seconds(300));
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Rejected
    );

    h.clock.set(start() + Duration::seconds(301));
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Rejected
    );
}

#[tokio::test]
async fn test_verify_requires_exact_match() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    for (email, code) in [
        ("a@x.com", "0000"),
        ("b@x.com", "4213"),
        ("A@x.com", "4213"),
        ("a@x.com", "4213 "),
    ] {
        assert_eq!(
            h.service.verify(email, code).await.unwrap(),
            VerifyOutcome::Rejected,
            "{} / {} should not verify",
            email,
            code
        );
    }
}

#[tokio::test]
async fn test_failed_attempt_does_not_invalidate() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    assert_eq!(
        h.service.verify("a@x.com", "0000").await.unwrap(),
        VerifyOutcome::Rejected
    );
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test]
async fn test_replay_allowed_by_default() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();

    assert!(h.service.verify("a@x.com", "4213").await.unwrap().is_verified());
    assert!(h.service.verify("a@x.com", "4213").await.unwrap().is_verified());
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn test_consume_on_verify_removes_record() {
    let config = OtpServiceConfig {
        consume_on_verify: true,
        ..OtpServiceConfig::default()
    };
    let h = harness_with(MockMailService::new(false), MockOtpStore::new(), config, "4213");
    h.service.issue("a@x.com").await.unwrap();

    assert!(h.service.verify("a@x.com", "4213").await.unwrap().is_verified());
    assert_eq!(
        h.service.verify("a@x.com", "4213").await.unwrap(),
        VerifyOutcome::Rejected
    );
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_consume_failure_still_verifies() {
    let config = OtpServiceConfig {
        consume_on_verify: true,
        ..OtpServiceConfig::default()
    };
    let h = harness_with(MockMailService::new(false), MockOtpStore::new(), config, "4213");
    h.service.issue("a@x.com").await.unwrap();
    h.store.fail_remove.store(true, Ordering::SeqCst);

    assert!(h.service.verify("a@x.com", "4213").await.unwrap().is_verified());
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn test_older_codes_stay_valid_after_reissue() {
    let mail = Arc::new(MockMailService::new(false));
    let store = Arc::new(MockOtpStore::new());
    let clock = Arc::new(ManualClock::new(start()));
    let service = OtpService::new(mail.clone(), store.clone(), OtpServiceConfig::default())
        .with_generator(Arc::new(SequenceOtpGenerator::new(&["1111", "2222"])))
        .with_clock(clock.clone());

    service.issue("a@x.com").await.unwrap();
    clock.advance(Duration::seconds(30));
    service.issue("a@x.com").await.unwrap();

    assert_eq!(mail.sent_count(), 2);
    assert!(service.verify("a@x.com", "1111").await.unwrap().is_verified());
    assert!(service.verify("a@x.com", "2222").await.unwrap().is_verified());

    // Each code keeps its own window
    clock.set(start() + Duration::seconds(300));
    assert_eq!(
        service.verify("a@x.com", "1111").await.unwrap(),
        VerifyOutcome::Rejected
    );
    assert!(service.verify("a@x.com", "2222").await.unwrap().is_verified());
}

#[tokio::test]
async fn test_verify_rejects_missing_fields_without_lookup() {
    let h = harness("4213");

    let cases = [("", "4213", "email"), ("a@x.com", "", "otp"), ("", "", "email")];
    for (email, code, expected) in cases {
        match h.service.verify(email, code).await {
            Err(DomainError::ValidationErr(ValidationError::RequiredField { field })) => {
                assert_eq!(field, expected);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    assert_eq!(h.store.find_calls(), 0);
}

#[tokio::test]
async fn test_verify_surfaces_store_failure() {
    let h = harness("4213");
    h.service.issue("a@x.com").await.unwrap();
    h.store.fail_find.store(true, Ordering::SeqCst);

    let result = h.service.verify("a@x.com", "4213").await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

#[tokio::test]
async fn test_custom_ttl() {
    let config = OtpServiceConfig {
        ttl_seconds: 60,
        ..OtpServiceConfig::default()
    };
    let h = harness_with(MockMailService::new(false), MockOtpStore::new(), config, "4213");

    let result = h.service.issue("a@x.com").await.unwrap();
    assert_eq!(result.expires_at, start() + Duration::seconds(60));
}

#[tokio::test]
async fn test_trait_objects_are_accepted() {
    let mail: Arc<dyn crate::services::otp::MailServiceTrait> =
        Arc::new(MockMailService::new(false));
    let store: Arc<dyn OtpStoreTrait> = Arc::new(MockOtpStore::new());
    let service = OtpService::new(mail, store, OtpServiceConfig::default());

    let result = service.issue("a@x.com").await.unwrap();
    assert_eq!(result.email, "a@x.com");
}
