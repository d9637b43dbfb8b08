//! MySQL-backed OTP store
//!
//! Records live in the `otp_records` table. Nothing expires natively, so
//! `find` filters on `created_at` and the sweeper deletes stale rows.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, info};

use mo_core::domain::entities::OtpRecord;
use mo_core::services::otp::OtpStoreTrait;
use mo_shared::utils::email::mask_email;

use crate::database::DatabasePool;
use crate::InfrastructureError;

/// Table definition, applied on startup
pub const CREATE_OTP_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS otp_records (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        email VARCHAR(320) NOT NULL,
        one_time_password VARCHAR(16) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        INDEX idx_otp_records_lookup (email, one_time_password),
        INDEX idx_otp_records_created_at (created_at)
    )
"#;

/// OTP store on top of MySQL
pub struct MySqlOtpStore {
    /// Database connection pool
    pool: DatabasePool,
    ttl: Duration,
}

impl MySqlOtpStore {
    pub fn new(pool: DatabasePool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    fn db(&self) -> &MySqlPool {
        self.pool.get_pool()
    }

    /// Create the table and indexes if they are missing
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        sqlx::query(CREATE_OTP_TABLE).execute(self.db()).await?;
        info!("OTP table is ready");
        Ok(())
    }

    async fn insert(&self, record: &OtpRecord) -> Result<(), InfrastructureError> {
        let query = r#"
            INSERT INTO otp_records (email, one_time_password, created_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&record.email)
            .bind(&record.code)
            // DATETIME(6) keeps microseconds; never round the stamp up
            .bind(record.issued_at.trunc_subsecs(6))
            .execute(self.db())
            .await?;

        Ok(())
    }

    async fn select_live(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, InfrastructureError> {
        let query = r#"
            SELECT email, one_time_password, created_at
            FROM otp_records
            WHERE email = ? AND one_time_password = ?
              AND created_at <= ? AND created_at > ?
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(code)
            .bind(at)
            .bind(at - self.ttl)
            .fetch_optional(self.db())
            .await?;

        row.map(|row| -> Result<OtpRecord, InfrastructureError> {
            Ok(OtpRecord {
                email: row.try_get("email")?,
                code: row.try_get("one_time_password")?,
                issued_at: row.try_get("created_at")?,
            })
        })
        .transpose()
    }

    async fn delete_pair(&self, email: &str, code: &str) -> Result<u64, InfrastructureError> {
        let result = sqlx::query(
            "DELETE FROM otp_records WHERE email = ? AND one_time_password = ?",
        )
        .bind(email)
        .bind(code)
        .execute(self.db())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, at: DateTime<Utc>) -> Result<u64, InfrastructureError> {
        let result = sqlx::query("DELETE FROM otp_records WHERE created_at <= ?")
            .bind(at - self.ttl)
            .execute(self.db())
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl OtpStoreTrait for MySqlOtpStore {
    async fn put(&self, record: &OtpRecord) -> Result<(), String> {
        self.insert(record).await.map_err(|e| {
            error!(
                email = %mask_email(&record.email),
                error = %e,
                "Failed to store OTP in database"
            );
            e.to_string()
        })?;

        debug!(email = %mask_email(&record.email), "Stored OTP in database");
        Ok(())
    }

    async fn find(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, String> {
        self.select_live(email, code, at).await.map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to look up OTP in database"
            );
            e.to_string()
        })
    }

    async fn remove(&self, email: &str, code: &str) -> Result<(), String> {
        self.delete_pair(email, code)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn purge_expired(&self, at: DateTime<Utc>) -> Result<u64, String> {
        self.delete_expired(at).await.map_err(|e| e.to_string())
    }

    async fn health_check(&self) -> Result<(), String> {
        debug!(pool = %self.pool.get_statistics(), "Checking MySQL OTP store");
        match self.pool.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected reply to SELECT 1".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}
