//! # MailOTP Core
//!
//! Core business logic for issuing and verifying email one-time passwords.
//! This crate contains the OTP record entity, the error taxonomy, and the
//! lifecycle service together with the traits its collaborators (mail
//! transport, OTP store) implement.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
