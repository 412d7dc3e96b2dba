//! Axum routes for lead notification endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{send_callback, send_chat_history, LeadAppState};

/// Creates routes for lead endpoints.
///
/// - POST /send-email - Callback request
/// - POST /send-chat-history - Conversation transcript
pub fn lead_routes() -> Router<LeadAppState> {
    Router::new()
        .route("/send-email", post(send_callback))
        .route("/send-chat-history", post(send_chat_history))
}
