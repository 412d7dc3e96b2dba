//! SendCallback command handler.
//!
//! Emails a callback request captured by the widget to the admin inbox.

use std::sync::Arc;

use chrono::Utc;

use super::{LeadError, LeadRouting};
use crate::domain::leads::CallbackRequest;
use crate::ports::{MailTransport, OutgoingEmail};

/// Command carrying the raw callback form.
#[derive(Debug, Clone, Default)]
pub struct SendCallbackCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// Correlation id for logs.
    pub request_id: String,
}

/// Handler for SendCallback commands.
pub struct SendCallbackHandler {
    transport: Arc<dyn MailTransport>,
    routing: LeadRouting,
}

impl SendCallbackHandler {
    pub fn new(transport: Arc<dyn MailTransport>, routing: LeadRouting) -> Self {
        Self { transport, routing }
    }

    /// Validates the form, renders the notification and submits it once.
    pub async fn handle(&self, cmd: SendCallbackCommand) -> Result<(), LeadError> {
        let request_id = cmd.request_id.as_str();

        let lead = CallbackRequest::new(
            cmd.name.as_deref(),
            cmd.email.as_deref(),
            cmd.phone.as_deref(),
            cmd.message.as_deref(),
        )
        .map_err(|err| {
            tracing::warn!(request_id, field = err.field(), "Callback request missing fields");
            err
        })?;

        let sent_at = self.routing.format_sent_at(Utc::now());
        let email = OutgoingEmail::new(
            self.routing.recipient.as_str(),
            CallbackRequest::SUBJECT,
            lead.render_body(&sent_at),
        );

        self.transport.send(email).await.map_err(|err| {
            tracing::error!(
                request_id,
                kind = err.kind(),
                error = %err,
                "Failed to send callback email"
            );
            err
        })?;

        tracing::info!(
            request_id,
            has_phone = lead.phone().is_some(),
            has_message = lead.message().is_some(),
            "Callback email sent"
        );
        Ok(())
    }
}
