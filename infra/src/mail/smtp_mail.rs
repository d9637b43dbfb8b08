//! SMTP mail transport
//!
//! Sends plain-text messages through a relay using lettre's async transport.
//! Port 465 uses implicit TLS; any other port negotiates STARTTLS.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use mo_core::services::otp::MailServiceTrait;
use mo_shared::config::MailConfig;
use mo_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// SMTP-backed mail service
pub struct SmtpMailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailService {
    /// Build a transport from configuration
    ///
    /// No connection is opened here; the relay is contacted on first send.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        config.validate().map_err(InfrastructureError::Config)?;

        let from = parse_sender(config.sender())?;

        let builder = if config.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| InfrastructureError::Mail(format!("Invalid SMTP relay: {}", e)))?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            implicit_tls = config.uses_implicit_tls(),
            "SMTP mail service configured"
        );

        Ok(Self { transport, from })
    }

    /// Assemble the message and the id it will carry
    pub fn build_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(Message, String), InfrastructureError> {
        let recipient: Mailbox = to
            .trim()
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient address: {}", e)))?;

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))?;

        Ok((message, message_id))
    }
}

/// Parse the configured sender address
pub(crate) fn parse_sender(address: &str) -> Result<Mailbox, InfrastructureError> {
    address
        .trim()
        .parse()
        .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))
}

#[async_trait]
impl MailServiceTrait for SmtpMailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let (message, message_id) = self
            .build_message(to, subject, body)
            .map_err(|e| e.to_string())?;

        self.transport.send(message).await.map_err(|e| {
            error!(
                to = %mask_email(to),
                error = %e,
                "SMTP delivery failed"
            );
            e.to_string()
        })?;

        info!(
            target: "mail_service",
            provider = "smtp",
            to = %mask_email(to),
            message_id = %message_id,
            "Mail sent"
        );

        Ok(message_id)
    }
}
