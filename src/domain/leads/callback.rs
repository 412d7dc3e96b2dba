//! Callback requests captured by the chat widget.

use crate::domain::foundation::{require_text, ValidationError};
use crate::domain::persona::BUSINESS_NAME;

/// Rendered in place of a missing optional field.
pub const NOT_PROVIDED: &str = "Not provided";

/// Rendered in place of a missing free-text message.
pub const NO_MESSAGE: &str = "No additional message provided";

/// Contact details a visitor left for a callback.
///
/// # Invariants
///
/// - `name` and `email` are non-blank
/// - `phone` and `message` are `None` rather than blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRequest {
    name: String,
    email: String,
    phone: Option<String>,
    message: Option<String>,
}

impl CallbackRequest {
    /// Subject line of the notification email.
    pub const SUBJECT: &'static str = "AMW Website - Chatbot Callback Request";

    /// Validates raw widget input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `name` or `email` is missing or blank
    pub fn new(
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = require_text("name", name)?;
        let email = require_text("email", email)?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: non_blank(phone),
            message: non_blank(message),
        })
    }

    /// Visitor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visitor email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Visitor phone, if given.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Free-text message, if given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Renders the plain-text email body.
    ///
    /// `sent_at` is a display string; its format is owned by the caller.
    pub fn render_body(&self, sent_at: &str) -> String {
        format!(
            "New Chatbot Callback Request\n\
             \n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             Sent from {business} chatbot\n\
             {sent_at}\n",
            name = self.name,
            email = self.email,
            phone = self.phone().unwrap_or(NOT_PROVIDED),
            message = self.message().unwrap_or(NO_MESSAGE),
            business = BUSINESS_NAME,
            sent_at = sent_at,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}
