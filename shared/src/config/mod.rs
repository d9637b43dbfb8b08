//! Configuration module with service-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection
//! - `mail` - Outbound SMTP transport configuration
//! - `otp` - OTP lifetime and store backend selection
//! - `server` - HTTP server and CORS configuration
//!
//! Every type offers `from_env()`, which reads process environment variables,
//! and `from_lookup()`, which reads from any key/value source (used in tests).

pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::{MailConfig, MailProvider};
pub use otp::{OtpConfig, StoreBackend, StoreConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// OTP store backend configuration
    pub store: StoreConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            store: StoreConfig::default(),
            otp: OtpConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        let cors = if environment.is_production() {
            CorsConfig::from_lookup(&lookup)
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_lookup(&lookup),
            mail: MailConfig::from_lookup(&lookup),
            store: StoreConfig::from_lookup(&lookup),
            otp: OtpConfig::from_lookup(&lookup),
            cors,
        }
    }
}

/// Parse a variable from the lookup source, falling back to `default` when it
/// is absent or malformed
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
