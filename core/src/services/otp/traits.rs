//! Traits for mail transport and OTP storage integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;

/// Trait for outbound mail integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a plain-text message, returning the transport's message id
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}

/// Trait for OTP record storage
///
/// Implementations must treat a record as absent once `at` falls outside
/// `[issued_at, issued_at + ttl)`, whether or not it has been physically
/// removed yet.
#[async_trait]
pub trait OtpStoreTrait: Send + Sync {
    /// Persist a new record
    async fn put(&self, record: &OtpRecord) -> Result<(), String>;

    /// Find a live record matching both fields exactly
    async fn find(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, String>;

    /// Delete every record for the pair
    async fn remove(&self, email: &str, code: &str) -> Result<(), String>;

    /// Physically delete records that expired before `at`, returning how many
    /// were removed. Stores that expire natively can leave the default.
    async fn purge_expired(&self, at: DateTime<Utc>) -> Result<u64, String> {
        let _ = at;
        Ok(0)
    }

    /// Probe the backend connection
    async fn health_check(&self) -> Result<(), String> {
        Ok(())
    }

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
