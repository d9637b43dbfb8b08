//! Mail Service Module
//!
//! Outbound mail transports used to deliver one-time passwords:
//!
//! - **SMTP**: delivery through a relay with lettre
//! - **Mock**: logs messages and keeps an outbox for development and tests

use std::sync::Arc;

use mo_core::services::otp::MailServiceTrait;
use mo_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

pub mod mock_mail;
pub mod smtp_mail;


pub use mock_mail::{MockMailService, OutboxMessage};
pub use smtp_mail::SmtpMailService;

/// Create the mail service selected by configuration
///
/// # Arguments
///
/// * `config` - Mail configuration containing provider settings
///
/// # Returns
///
/// A shared mail service, or a configuration error when SMTP credentials are
/// missing or malformed
pub fn create_mail_service(
    config: &MailConfig,
) -> Result<Arc<dyn MailServiceTrait>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock => {
            tracing::warn!("Using mock mail service; codes are logged, not delivered");
            Ok(Arc::new(MockMailService::new()))
        }
        MailProvider::Smtp => Ok(Arc::new(SmtpMailService::new(config)?)),
    }
}
