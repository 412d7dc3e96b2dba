//! Mock mail transport for testing.
//!
//! Records every submitted email and can be told to fail.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{MailError, MailTransport, OutgoingEmail};

/// Recording mail transport.
#[derive(Debug, Clone, Default)]
pub struct MockMailTransport {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    fail_with: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockMailTransport {
    /// Creates a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport whose every send fails as unavailable.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(message.into()),
        }
    }

    /// Number of send attempts, successful or not.
    pub fn send_count(&self) -> usize {
        lock(&self.sent).len()
    }

    /// All submitted emails in order.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        lock(&self.sent).push(email);

        match &self.fail_with {
            Some(message) => Err(MailError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}
