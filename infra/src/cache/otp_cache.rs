//! Redis-backed OTP store
//!
//! Each record is a JSON value under `otp:{email}:{code}` written with a
//! native expiry equal to the OTP lifetime. `find` still checks the issue
//! time so a key Redis has not yet evicted is never matched late.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error};

use mo_core::domain::entities::OtpRecord;
use mo_core::services::otp::OtpStoreTrait;
use mo_shared::utils::email::mask_email;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis key prefix for OTP records
const OTP_KEY_PREFIX: &str = "otp";

/// Key for an email/code pair, before any configured prefix
pub fn otp_key(email: &str, code: &str) -> String {
    format!("{}:{}:{}", OTP_KEY_PREFIX, email, code)
}

/// OTP store on top of Redis
///
/// Issuing the same code twice to one address overwrites the earlier key
/// with the later issue time, which verifies exactly as keeping both would.
pub struct RedisOtpStore {
    client: RedisClient,
    ttl: Duration,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    fn key(&self, email: &str, code: &str) -> String {
        self.client.make_key(&otp_key(email, code))
    }

    fn expiry_seconds(&self) -> u64 {
        self.ttl.num_seconds().max(1) as u64
    }

    async fn put_record(&self, record: &OtpRecord) -> Result<(), InfrastructureError> {
        let payload = serde_json::to_string(record)?;
        self.client
            .set_with_expiry(&self.key(&record.email, &record.code), &payload, self.expiry_seconds())
            .await
    }

    async fn find_record(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, InfrastructureError> {
        let Some(payload) = self.client.get(&self.key(email, code)).await? else {
            return Ok(None);
        };

        let record: OtpRecord = serde_json::from_str(&payload)?;
        Ok(decide_match(record, email, code, at, self.ttl))
    }
}

/// Keep a decoded record only if it matches and is live at `at`
pub(crate) fn decide_match(
    record: OtpRecord,
    email: &str,
    code: &str,
    at: DateTime<Utc>,
    ttl: Duration,
) -> Option<OtpRecord> {
    (record.matches(email, code) && record.is_live_at(at, ttl)).then_some(record)
}

#[async_trait]
impl OtpStoreTrait for RedisOtpStore {
    async fn put(&self, record: &OtpRecord) -> Result<(), String> {
        self.put_record(record).await.map_err(|e| {
            error!(
                email = %mask_email(&record.email),
                error = %e,
                "Failed to store OTP in Redis"
            );
            e.to_string()
        })?;

        debug!(email = %mask_email(&record.email), "Stored OTP in Redis");
        Ok(())
    }

    async fn find(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, String> {
        self.find_record(email, code, at)
            .await
            .map_err(|e| e.to_string())
    }

    async fn remove(&self, email: &str, code: &str) -> Result<(), String> {
        self.client
            .delete(&self.key(email, code))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn health_check(&self) -> Result<(), String> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected reply to PING".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
