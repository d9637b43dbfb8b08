//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, ExpirySweeper, ExpirySweeperConfig, IssueResult, MailServiceTrait, ManualClock,
    OtpGenerator, OtpService, OtpServiceConfig, OtpStoreTrait, RandomOtpGenerator, SystemClock,
    VerifyOutcome, OTP_MAIL_SUBJECT,
};
