//! OTP record entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of decimal digits in a code
pub const CODE_LENGTH: usize = 4;

/// Smallest code the generator produces
pub const CODE_MIN: u32 = 1000;

/// Largest code the generator produces.
///
/// Codes above 9899 are never issued even though they fit in four digits.
pub const CODE_MAX: u32 = 9899;

/// Default lifetime of a record (5 minutes)
pub const OTP_TTL_SECONDS: i64 = 300;

/// A code issued to an email address.
///
/// Records are written once and never updated. Several records may exist for
/// the same email at the same time; each one is matchable during
/// `[issued_at, issued_at + ttl)` and behaves as absent afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Address the code was sent to, stored exactly as submitted
    pub email: String,

    /// The numeric code as a string
    pub code: String,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Create a record
    pub fn new(email: impl Into<String>, code: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            issued_at,
        }
    }

    /// The first instant at which the record is no longer live
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.issued_at + ttl
    }

    /// Whether the record is matchable at `at`
    pub fn is_live_at(&self, at: DateTime<Utc>, ttl: Duration) -> bool {
        at >= self.issued_at && at < self.expires_at(ttl)
    }

    /// Exact, case-sensitive match on both fields
    pub fn matches(&self, email: &str, code: &str) -> bool {
        self.email == email && self.code == code
    }
}
