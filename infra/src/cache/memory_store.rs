//! Process-local OTP store
//!
//! Records live in a map keyed by email and vanish when the process exits.
//! Suitable for development and single-instance deployments.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use mo_core::domain::entities::OtpRecord;
use mo_core::services::otp::OtpStoreTrait;

/// In-memory OTP store
pub struct InMemoryOtpStore {
    /// Records grouped by email
    records: RwLock<HashMap<String, Vec<OtpRecord>>>,
    ttl: Duration,
}

impl InMemoryOtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of records held, live or not
    pub async fn len(&self) -> usize {
        self.records.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl OtpStoreTrait for InMemoryOtpStore {
    async fn put(&self, record: &OtpRecord) -> Result<(), String> {
        self.records
            .write()
            .await
            .entry(record.email.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find(
        &self,
        email: &str,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, String> {
        let records = self.records.read().await;
        let found = records.get(email).and_then(|entries| {
            entries
                .iter()
                .filter(|r| r.code == code && r.is_live_at(at, self.ttl))
                .max_by_key(|r| r.issued_at)
                .cloned()
        });
        Ok(found)
    }

    async fn remove(&self, email: &str, code: &str) -> Result<(), String> {
        let mut records = self.records.write().await;
        if let Some(entries) = records.get_mut(email) {
            entries.retain(|r| r.code != code);
            if entries.is_empty() {
                records.remove(email);
            }
        }
        Ok(())
    }

    async fn purge_expired(&self, at: DateTime<Utc>) -> Result<u64, String> {
        let mut records = self.records.write().await;
        let mut removed = 0u64;

        records.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|r| r.expires_at(self.ttl) > at);
            removed += (before - entries.len()) as u64;
            !entries.is_empty()
        });

        debug!(removed = removed, "Purged expired in-memory OTP records");
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
