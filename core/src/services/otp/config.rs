//! Configuration for the OTP service

use chrono::Duration;
use mo_shared::OtpConfig;

use crate::domain::entities::otp_record::OTP_TTL_SECONDS;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds a record stays matchable after issue
    pub ttl_seconds: i64,
    /// Delete a record once it has been verified successfully
    pub consume_on_verify: bool,
}

impl OtpServiceConfig {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds)
    }
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: OTP_TTL_SECONDS,
            consume_on_verify: false,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            consume_on_verify: config.consume_on_verify,
        }
    }
}
