//! Mock Mail Service Implementation
//!
//! Logs messages instead of sending them and keeps the most recent ones in
//! a bounded outbox so development setups and tests can read the code back.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use mo_core::services::otp::MailServiceTrait;
use mo_shared::utils::email::mask_email;

/// A message captured by the mock transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Messages retained by default; older ones are dropped first
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Mock mail service for development and testing
#[derive(Clone)]
pub struct MockMailService {
    outbox: Arc<Mutex<VecDeque<OutboxMessage>>>,
    capacity: usize,
    /// Total messages sent, including ones no longer retained
    sent: Arc<AtomicUsize>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl MockMailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` messages (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
            sent: Arc::new(AtomicUsize::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A service whose every send fails
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn outbox(&self) -> MutexGuard<'_, VecDeque<OutboxMessage>> {
        self.outbox.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of messages sent
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    /// Retained messages, oldest first
    pub fn messages(&self) -> Vec<OutboxMessage> {
        self.outbox().iter().cloned().collect()
    }

    /// The latest message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<OutboxMessage> {
        self.outbox().iter().rev().find(|m| m.to == to).cloned()
    }
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %mask_email(to), "Mock mail service simulating failure");
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());

        info!(
            target: "mail_service",
            provider = "mock",
            to = %mask_email(to),
            message_id = %message_id,
            subject = subject,
            body = body,
            "Mail sent (mock)"
        );

        let mut outbox = self.outbox();
        if outbox.len() >= self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(OutboxMessage {
            message_id: message_id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        drop(outbox);
        self.sent.fetch_add(1, Ordering::SeqCst);

        Ok(message_id)
    }
}
