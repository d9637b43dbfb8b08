//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a code.
///
/// Does not carry the code; that only travels by mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueResult {
    /// Address the code was sent to
    pub email: String,
    /// When the record was stamped
    pub issued_at: DateTime<Utc>,
    /// End of the verification window
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the mail transport
    pub message_id: String,
}

/// Outcome of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// A live record matched
    Verified,
    /// No live record matched (wrong code, wrong email, or expired)
    Rejected,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }
}
