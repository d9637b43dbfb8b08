//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use mo_api::{routes::pages::StaticPages, AppState};
use mo_core::domain::entities::otp_record::{OtpRecord, OTP_TTL_SECONDS};
use mo_core::services::otp::{ManualClock, OtpService, OtpServiceConfig, OtpStoreTrait};
use mo_infra::{InMemoryOtpStore, MockMailService};

pub type TestState = AppState<MockMailService, InMemoryOtpStore>;

/// Everything a test needs to drive and inspect the application
pub struct TestContext {
    pub mail: Arc<MockMailService>,
    pub store: Arc<InMemoryOtpStore>,
    pub clock: Arc<ManualClock>,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn ttl() -> Duration {
    Duration::seconds(OTP_TTL_SECONDS)
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            mail: Arc::new(MockMailService::new()),
            store: Arc::new(InMemoryOtpStore::new(ttl())),
            clock: Arc::new(ManualClock::new(start_time())),
        }
    }

    pub fn with_failing_mail() -> Self {
        let context = Self::new();
        context.mail.set_simulate_failure(true);
        context
    }

    pub fn state(&self) -> TestState {
        self.state_with(OtpServiceConfig::default())
    }

    pub fn state_with(&self, config: OtpServiceConfig) -> TestState {
        let service = OtpService::new(self.mail.clone(), self.store.clone(), config)
            .with_clock(self.clock.clone());
        AppState::new(Arc::new(service), StaticPages::bundled())
    }

    /// The code from the most recent mail sent to `email`
    pub fn code_sent_to(&self, email: &str) -> String {
        let message = self
            .mail
            .last_message_to(email)
            .expect("no mail was sent to this address");
        message
            .body
            .rsplit(' ')
            .next()
            .expect("mail body has no code")
            .to_string()
    }
}

/// A store whose every operation fails
pub struct BrokenStore;

#[async_trait]
impl OtpStoreTrait for BrokenStore {
    async fn put(&self, _record: &OtpRecord) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    async fn find(
        &self,
        _email: &str,
        _code: &str,
        _at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, String> {
        Err("connection refused".to_string())
    }

    async fn remove(&self, _email: &str, _code: &str) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    async fn health_check(&self) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

pub fn broken_store_state(mail: Arc<MockMailService>) -> AppState<MockMailService, BrokenStore> {
    let service = OtpService::new(mail, Arc::new(BrokenStore), OtpServiceConfig::default());
    AppState::new(Arc::new(service), StaticPages::bundled())
}
