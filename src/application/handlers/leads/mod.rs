//! Lead notification handlers.
//!
//! Both handlers are one-shot: render the template, submit once, report.

mod send_callback;
mod send_transcript;

pub use send_callback::{SendCallbackCommand, SendCallbackHandler};
pub use send_transcript::{SendTranscriptCommand, SendTranscriptHandler};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::MailError;

/// Where lead notifications go and how their send time is displayed.
#[derive(Debug, Clone)]
pub struct LeadRouting {
    /// Admin inbox that receives every notification.
    pub recipient: String,
    /// Timezone used to render the send time in callback emails.
    pub timezone: Tz,
}

impl LeadRouting {
    /// Creates routing for the given recipient and display timezone.
    pub fn new(recipient: impl Into<String>, timezone: Tz) -> Self {
        Self {
            recipient: recipient.into(),
            timezone,
        }
    }

    /// Formats `at` as a local wall-clock string, e.g. `7/4/2025, 2:05:09 PM`.
    pub fn format_sent_at(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    }
}

/// Errors that can occur when dispatching a lead notification.
#[derive(Debug, Error)]
pub enum LeadError {
    /// A required field was missing or blank.
    #[error("Validation error: {0}")]
    MissingFields(#[from] ValidationError),

    /// The transport refused or failed to accept the message.
    #[error("Mail transport error: {0}")]
    Transport(#[from] MailError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sent_at_uses_display_timezone() {
        let routing = LeadRouting::new("admin@example.com", chrono_tz::America::Chicago);
        // 19:05:09 UTC in July is 2:05:09 PM CDT.
        let at = Utc.with_ymd_and_hms(2025, 7, 4, 19, 5, 9).unwrap();

        assert_eq!(routing.format_sent_at(at), "7/4/2025, 2:05:09 PM");
    }

    #[test]
    fn sent_at_tracks_standard_time() {
        let routing = LeadRouting::new("admin@example.com", chrono_tz::America::Chicago);
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap();

        assert_eq!(routing.format_sent_at(at), "1/15/2025, 12:00:00 AM");
    }
}
