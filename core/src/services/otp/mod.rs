//! OTP service module for email-based verification
//!
//! This module provides the full one-time password lifecycle:
//! - Code generation and delivery by mail
//! - Time-bounded verification against a pluggable store
//! - Background sweeping of expired records

mod clock;
mod config;
mod generator;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OtpServiceConfig;
pub use generator::{OtpGenerator, RandomOtpGenerator};
pub use service::{OtpService, OTP_MAIL_SUBJECT};
pub use sweeper::{ExpirySweeper, ExpirySweeperConfig};
pub use traits::{MailServiceTrait, OtpStoreTrait};
pub use types::{IssueResult, VerifyOutcome};
