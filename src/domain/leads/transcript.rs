//! Chat transcripts exported when the visitor closes the widget.

use crate::domain::foundation::{require_text, ValidationError};
use crate::domain::persona::BUSINESS_NAME;

use super::callback::NOT_PROVIDED;

/// A transcript rendered by the widget, forwarded verbatim.
///
/// The server does not parse either field: the widget owns transcript
/// formatting and the timestamp is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    transcript: String,
    timestamp: Option<String>,
}

impl ChatTranscript {
    /// Subject line of the transcript email.
    pub const SUBJECT: &'static str = "AMW Website - Chatbot Conversation History";

    /// Validates raw widget input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the transcript is missing or blank
    pub fn new(transcript: Option<&str>, timestamp: Option<&str>) -> Result<Self, ValidationError> {
        let transcript = require_text("chatHistory", transcript)?;

        Ok(Self {
            transcript: transcript.to_string(),
            timestamp: timestamp
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.to_string()),
        })
    }

    /// The transcript text.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Renders the plain-text email body.
    pub fn render_body(&self) -> String {
        format!(
            "Chat Conversation History\n\
             \n\
             Timestamp: {timestamp}\n\
             \n\
             Conversation:\n\
             {transcript}\n\
             \n\
             ---\n\
             Sent from {business} chatbot\n",
            timestamp = self.timestamp.as_deref().unwrap_or(NOT_PROVIDED),
            transcript = self.transcript,
            business = BUSINESS_NAME,
        )
    }
}
