//! Main OTP service implementation

use std::sync::Arc;

use mo_shared::utils::email::mask_email;
use mo_shared::utils::validation::{first_missing, is_missing};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainError, DomainResult, ValidationError};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::generator::{OtpGenerator, RandomOtpGenerator};
use super::traits::{MailServiceTrait, OtpStoreTrait};
use super::types::{IssueResult, VerifyOutcome};

/// Subject line of every OTP mail
pub const OTP_MAIL_SUBJECT: &str = "One Time Password (OTP)";

/// Render the plain-text mail body for a code
fn mail_body(code: &str) -> String {
    format!("Your OTP is: {}", code)
}

/// OTP service for issuing and verifying email codes
pub struct OtpService<M, S>
where
    M: MailServiceTrait + ?Sized,
    S: OtpStoreTrait + ?Sized,
{
    /// Mail transport for delivering codes
    mail_service: Arc<M>,
    /// Store holding issued records
    store: Arc<S>,
    generator: Arc<dyn OtpGenerator>,
    clock: Arc<dyn Clock>,
    config: OtpServiceConfig,
}

impl<M, S> OtpService<M, S>
where
    M: MailServiceTrait + ?Sized,
    S: OtpStoreTrait + ?Sized,
{
    /// Create a service with a random generator and the system clock
    ///
    /// # Arguments
    ///
    /// * `mail_service` - Mail transport implementation
    /// * `store` - OTP store implementation
    /// * `config` - Service configuration
    pub fn new(mail_service: Arc<M>, store: Arc<S>, config: OtpServiceConfig) -> Self {
        Self {
            mail_service,
            store,
            generator: Arc::new(RandomOtpGenerator::new()),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn OtpGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issue a new code to an email address
    ///
    /// This method:
    /// 1. Rejects a missing or blank email
    /// 2. Generates a fresh code
    /// 3. Mails the code
    /// 4. Persists the record, stamped after delivery succeeded
    ///
    /// Nothing is persisted when delivery fails. A delivered code whose
    /// record then fails to persist can never verify.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - The issue window and transport message id
    /// * `Err(DomainError)` - Validation, delivery, or storage failure
    pub async fn issue(&self, email: &str) -> DomainResult<IssueResult> {
        if is_missing(Some(email)) {
            return Err(ValidationError::required("email").into());
        }

        let masked = mask_email(email);
        let code = self.generator.generate();

        let message_id = self
            .mail_service
            .send(email, OTP_MAIL_SUBJECT, &mail_body(&code))
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send OTP mail"
                );
                DomainError::Delivery { message: e }
            })?;

        let record = OtpRecord::new(email, code, self.clock.now());

        self.store.put(&record).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                backend = self.store.backend_name(),
                event = "otp_storage_failed",
                "Failed to store OTP after delivery"
            );
            DomainError::Storage { message: e }
        })?;

        let expires_at = record.expires_at(self.config.ttl());

        tracing::info!(
            email = %masked,
            message_id = %message_id,
            expires_at = %expires_at,
            event = "otp_issued",
            "Issued OTP"
        );

        Ok(IssueResult {
            email: record.email,
            issued_at: record.issued_at,
            expires_at,
            message_id,
        })
    }

    /// Check a submitted code against the store
    ///
    /// Matching is exact on both email and code. A failed attempt leaves
    /// every record untouched; a successful one deletes the matched record
    /// only when `consume_on_verify` is enabled, and a failed delete is
    /// logged without changing the outcome.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - Whether a live record matched
    /// * `Err(DomainError)` - Missing input or a store failure
    pub async fn verify(&self, email: &str, code: &str) -> DomainResult<VerifyOutcome> {
        if let Some(field) = first_missing(&[("email", Some(email)), ("otp", Some(code))]) {
            return Err(ValidationError::required(field).into());
        }

        let masked = mask_email(email);
        let now = self.clock.now();

        let found = self.store.find(email, code, now).await.map_err(|e| {
            tracing::error!(
                email = %masked,
                error = %e,
                backend = self.store.backend_name(),
                event = "otp_lookup_failed",
                "Failed to look up OTP"
            );
            DomainError::Storage { message: e }
        })?;

        let Some(record) = found else {
            tracing::warn!(
                email = %masked,
                event = "otp_rejected",
                "OTP verification failed"
            );
            return Ok(VerifyOutcome::Rejected);
        };

        if self.config.consume_on_verify {
            if let Err(e) = self.store.remove(&record.email, &record.code).await {
                tracing::warn!(
                    email = %masked,
                    error = %e,
                    event = "otp_consume_failed",
                    "Failed to remove verified OTP"
                );
            }
        }

        tracing::info!(
            email = %masked,
            consumed = self.config.consume_on_verify,
            event = "otp_verified",
            "OTP verified"
        );

        Ok(VerifyOutcome::Verified)
    }
}
