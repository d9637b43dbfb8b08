//! Background removal of expired OTP records
//!
//! Stores already hide expired records from `find`; the sweeper only keeps
//! their physical size bounded.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::{DomainError, DomainResult};

use super::clock::{Clock, SystemClock};
use super::traits::OtpStoreTrait;

/// Configuration for the expiry sweeper
#[derive(Debug, Clone)]
pub struct ExpirySweeperConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to sweep at all
    pub enabled: bool,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl ExpirySweeperConfig {
    /// Build from an interval where `0` disables sweeping
    pub fn every(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            enabled: interval_seconds > 0,
        }
    }
}

/// Periodically purges expired records from a store
pub struct ExpirySweeper<S: OtpStoreTrait + ?Sized + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: ExpirySweeperConfig,
}

impl<S: OtpStoreTrait + ?Sized + 'static> ExpirySweeper<S> {
    pub fn new(store: Arc<S>, config: ExpirySweeperConfig) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single sweep, returning the number of records deleted
    pub async fn run_once(&self) -> DomainResult<u64> {
        if !self.config.enabled {
            return Ok(0);
        }

        let removed = self
            .store
            .purge_expired(self.clock.now())
            .await
            .map_err(|e| DomainError::Storage { message: e })?;

        if removed > 0 {
            info!(
                removed = removed,
                backend = self.store.backend_name(),
                event = "otp_sweep",
                "Purged expired OTP records"
            );
        }

        Ok(removed)
    }

    /// Start sweeping as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP expiry sweeper is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                backend = self.store.backend_name(),
                "OTP expiry sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick completes immediately
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("OTP sweep failed: {}", e);
                }
            }
        }))
    }
}
