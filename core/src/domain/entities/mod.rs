//! Domain entities representing core business objects.

pub mod otp_record;


// Re-export commonly used types
pub use otp_record::{OtpRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, OTP_TTL_SECONDS};
