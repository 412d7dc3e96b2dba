//! Error body shared by every endpoint.
//!
//! Callers only ever see these fixed strings. Upstream detail stays in logs.

use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use serde::Serialize;

use crate::domain::persona::CONTACT_PHONE;

/// Error message for a body that is not JSON of the expected shape.
pub const INVALID_BODY: &str = "Invalid request body";

/// JSON error body: `{ error, message? }`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Error without a follow-up message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// Error with a follow-up message for the visitor.
    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

/// Fallback shown when the chatbot cannot answer.
pub fn chat_fallback() -> String {
    format!(
        "Please try again or call us at {} for immediate assistance.",
        CONTACT_PHONE
    )
}

/// Fallback shown when a lead notification cannot be delivered.
pub fn lead_fallback() -> String {
    format!("Please call us at {} for immediate assistance.", CONTACT_PHONE)
}

/// Reads the request id set by the request-id layer.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Logs a body rejection before it is collapsed into `INVALID_BODY`.
pub fn log_rejection(request_id: &str, rejection: &JsonRejection) {
    tracing::warn!(
        request_id,
        status = rejection.status().as_u16(),
        reason = %rejection.body_text(),
        "Rejected request body"
    );
}
