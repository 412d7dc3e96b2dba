//! Axum routes for the chat endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{send_chat, ChatAppState};

/// Creates routes for the chat endpoint.
///
/// - POST /chat - Answer one visitor message
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route("/chat", post(send_chat))
}
