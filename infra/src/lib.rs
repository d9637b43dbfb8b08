//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the MailOTP core depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: process-local and Redis OTP stores
//! - **Database**: MySQL OTP store using SQLx
//! - **Mail**: SMTP delivery through lettre plus a mock transport

use std::sync::Arc;

use chrono::Duration;
use mo_core::services::otp::OtpStoreTrait;
use mo_shared::config::{StoreBackend, StoreConfig};

// Re-export core types for convenience
pub use mo_core::errors::*;

/// Cache module - in-memory and Redis OTP stores
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mail module - outbound mail transports
pub mod mail;

pub use cache::{InMemoryOtpStore, RedisClient, RedisOtpStore};
pub use database::{DatabasePool, MySqlOtpStore};
pub use mail::{create_mail_service, MockMailService, SmtpMailService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Mail transport error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Build the OTP store selected by configuration
///
/// Connects to the backend and, for MySQL, makes sure the table exists.
/// Every store applies the same `ttl` when deciding whether a record is live.
pub async fn create_otp_store(
    config: &StoreConfig,
    ttl: Duration,
) -> Result<Arc<dyn OtpStoreTrait>, InfrastructureError> {
    tracing::info!(backend = %config.backend, "Initializing OTP store");

    let store: Arc<dyn OtpStoreTrait> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryOtpStore::new(ttl)),
        StoreBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            Arc::new(RedisOtpStore::new(client, ttl))
        }
        StoreBackend::MySql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            let store = MySqlOtpStore::new(pool, ttl);
            store.ensure_schema().await?;
            Arc::new(store)
        }
    };

    Ok(store)
}
