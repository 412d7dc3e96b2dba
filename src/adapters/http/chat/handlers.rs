//! HTTP handlers for the chat endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::{
    chat_fallback, log_rejection, request_id, ErrorResponse, INVALID_BODY,
};
use crate::application::handlers::conversation::{
    SendChatCommand, SendChatError, SendChatHandler,
};

use super::dto::{ChatRequest, ChatResponse};

/// Shared state for the chat endpoint.
#[derive(Clone)]
pub struct ChatAppState {
    pub send_chat: Arc<SendChatHandler>,
}

impl ChatAppState {
    pub fn new(send_chat: Arc<SendChatHandler>) -> Self {
        Self { send_chat }
    }
}

/// POST /api/chat - Answer one visitor message.
///
/// # Errors
/// - 400 Bad Request: body is not JSON, or `history`/`userMessage` missing
/// - 500 Internal Server Error: the provider failed or returned nothing
pub async fn send_chat(
    State(state): State<ChatAppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatApiError> {
    let request_id = request_id(&headers);

    let Json(request) = payload.map_err(|rejection| {
        log_rejection(&request_id, &rejection);
        ChatApiError::InvalidBody
    })?;

    let cmd = SendChatCommand::new(request.history, request.user_message, request_id);
    let result = state.send_chat.handle(cmd).await?;

    Ok(Json(ChatResponse {
        message: result.reply,
    }))
}

/// API error for the chat endpoint.
#[derive(Debug)]
pub enum ChatApiError {
    InvalidBody,
    MissingFields,
    Upstream,
}

impl From<SendChatError> for ChatApiError {
    fn from(err: SendChatError) -> Self {
        match err {
            SendChatError::MissingFields(_) => ChatApiError::MissingFields,
            // Already logged with full detail by the handler.
            SendChatError::Provider(_) => ChatApiError::Upstream,
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::InvalidBody => (StatusCode::BAD_REQUEST, ErrorResponse::new(INVALID_BODY)),
            ChatApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing required fields"),
            ),
            ChatApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_message("Failed to get response from chatbot", chat_fallback()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::ports::AIError;

    #[test]
    fn provider_errors_collapse_to_upstream() {
        let err: ChatApiError = SendChatError::Provider(AIError::AuthenticationFailed).into();
        assert!(matches!(err, ChatApiError::Upstream));
    }

    #[test]
    fn validation_errors_are_missing_fields() {
        let err: ChatApiError =
            SendChatError::MissingFields(ValidationError::empty_field("history")).into();
        assert!(matches!(err, ChatApiError::MissingFields));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ChatApiError::InvalidBody.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChatApiError::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChatApiError::Upstream.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
