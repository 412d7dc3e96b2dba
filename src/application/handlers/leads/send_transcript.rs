//! SendTranscript command handler.
//!
//! Emails the widget's rendered conversation to the admin inbox. Repeated
//! exports are not deduplicated.

use std::sync::Arc;

use super::{LeadError, LeadRouting};
use crate::domain::leads::ChatTranscript;
use crate::ports::{MailTransport, OutgoingEmail};

/// Command carrying a rendered transcript.
#[derive(Debug, Clone, Default)]
pub struct SendTranscriptCommand {
    pub chat_history: Option<String>,
    pub timestamp: Option<String>,
    /// Correlation id for logs.
    pub request_id: String,
}

/// Handler for SendTranscript commands.
pub struct SendTranscriptHandler {
    transport: Arc<dyn MailTransport>,
    routing: LeadRouting,
}

impl SendTranscriptHandler {
    pub fn new(transport: Arc<dyn MailTransport>, routing: LeadRouting) -> Self {
        Self { transport, routing }
    }

    pub async fn handle(&self, cmd: SendTranscriptCommand) -> Result<(), LeadError> {
        let request_id = cmd.request_id.as_str();

        let export = ChatTranscript::new(cmd.chat_history.as_deref(), cmd.timestamp.as_deref())
            .map_err(|err| {
                tracing::warn!(request_id, "Chat history export without transcript");
                err
            })?;

        let email = OutgoingEmail::new(
            self.routing.recipient.as_str(),
            ChatTranscript::SUBJECT,
            export.render_body(),
        );

        self.transport.send(email).await.map_err(|err| {
            tracing::error!(
                request_id,
                kind = err.kind(),
                error = %err,
                "Failed to send chat history email"
            );
            err
        })?;

        tracing::info!(
            request_id,
            transcript_len = export.transcript().len(),
            "Chat history email sent"
        );
        Ok(())
    }
}
