//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Mail transport provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Real SMTP relay
    Smtp,
    /// Logs messages instead of sending them (development and tests)
    Mock,
}

impl Default for MailProvider {
    fn default() -> Self {
        MailProvider::Smtp
    }
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" | "console" => Ok(MailProvider::Mock),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// SMTP transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Which transport to build
    pub provider: MailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port. 465 uses implicit TLS, anything else STARTTLS.
    pub smtp_port: u16,

    /// SMTP username, also used as the sender address unless `from_address` is set
    pub username: String,

    /// SMTP password
    #[serde(skip_serializing)]
    pub password: String,

    /// Explicit sender address
    #[serde(default)]
    pub from_address: Option<String>,

    /// Timeout for a single send, in seconds
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            username: String::new(),
            password: String::new(),
            from_address: None,
            timeout_seconds: 30,
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Create from a key/value source
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            provider: parse_or(lookup, "MAIL_PROVIDER", defaults.provider),
            smtp_host: lookup("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: parse_or(lookup, "SMTP_PORT", defaults.smtp_port),
            username: lookup("EMAIL_USER").unwrap_or_default(),
            password: lookup("MAIL_PASS").unwrap_or_default(),
            from_address: lookup("MAIL_FROM").filter(|from| !from.trim().is_empty()),
            timeout_seconds: parse_or(lookup, "SMTP_TIMEOUT_SECONDS", defaults.timeout_seconds),
        }
    }

    /// A mock transport for development
    pub fn mock() -> Self {
        Self {
            provider: MailProvider::Mock,
            username: String::from("no-reply@localhost"),
            ..Default::default()
        }
    }

    /// Sender address for outgoing mail
    pub fn sender(&self) -> &str {
        self.from_address.as_deref().unwrap_or(&self.username)
    }

    /// Whether the relay expects implicit TLS on connect
    pub fn uses_implicit_tls(&self) -> bool {
        self.smtp_port == 465
    }

    /// Check that the credentials the selected provider needs are present
    pub fn validate(&self) -> Result<(), String> {
        if self.provider == MailProvider::Mock {
            return Ok(());
        }
        if self.smtp_host.trim().is_empty() {
            return Err("SMTP_HOST must be set".to_string());
        }
        if self.username.trim().is_empty() {
            return Err("EMAIL_USER must be set for the smtp mail provider".to_string());
        }
        if self.password.is_empty() {
            return Err("MAIL_PASS must be set for the smtp mail provider".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_defaults_match_gmail_relay() {
        let config = MailConfig::default();
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 465);
        assert!(config.uses_implicit_tls());
        assert_eq!(config.provider, MailProvider::Smtp);
    }

    #[test]
    fn test_sender_falls_back_to_username() {
        let lookup = |key: &str| match key {
            "EMAIL_USER" => Some("otp@example.com".to_string()),
            "MAIL_PASS" => Some("app-password".to_string()),
            _ => None,
        };
        let config = MailConfig::from_lookup(&lookup);
        assert_eq!(config.sender(), "otp@example.com");
        assert!(config.validate().is_ok());

        let config = MailConfig {
            from_address: Some("OTP <noreply@example.com>".to_string()),
            ..config
        };
        assert_eq!(config.sender(), "OTP <noreply@example.com>");
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let config = MailConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("EMAIL_USER"));

        let config = MailConfig {
            username: "otp@example.com".to_string(),
            ..MailConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("MAIL_PASS"));
    }

    #[test]
    fn test_mock_needs_no_credentials() {
        assert!(MailConfig::mock().validate().is_ok());
        assert_eq!("console".parse::<MailProvider>(), Ok(MailProvider::Mock));
    }

    #[test]
    fn test_starttls_port() {
        let lookup = |key: &str| (key == "SMTP_PORT").then(|| "587".to_string());
        let config = MailConfig::from_lookup(&lookup);
        assert_eq!(config.smtp_port, 587);
        assert!(!config.uses_implicit_tls());
    }
}
