//! Mail Transport Port - Interface for outbound email delivery.
//!
//! Lead notifications are fire-and-forget: the transport's own
//! acknowledgment is the only delivery confirmation, and nothing is queued
//! or retried on failure.

use async_trait::async_trait;

/// Port for sending plain-text email.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submits one message to the transport.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// A plain-text email ready for submission.
///
/// The sender address belongs to the transport's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl OutgoingEmail {
    /// Creates a new email.
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Mail transport errors.
///
/// Carries upstream detail for server-side logs only.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Credentials were rejected.
    #[error("mail transport rejected credentials")]
    Unauthorized,

    /// The message itself was refused (bad address, malformed payload).
    #[error("message rejected: {0}")]
    Rejected(String),

    /// Transport is down or returned a server error.
    #[error("mail transport unavailable: {0}")]
    Unavailable(String),

    /// Network error during submission.
    #[error("network error: {0}")]
    Network(String),

    /// Submission timed out.
    #[error("mail submission timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl MailError {
    /// Short, stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MailError::Unauthorized => "unauthorized",
            MailError::Rejected(_) => "rejected",
            MailError::Unavailable(_) => "unavailable",
            MailError::Network(_) => "network",
            MailError::Timeout { .. } => "timeout",
        }
    }
}
