//! HTTP handlers for lead notification endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::{
    lead_fallback, log_rejection, request_id, ErrorResponse, INVALID_BODY,
};
use crate::application::handlers::leads::{
    LeadError, SendCallbackCommand, SendCallbackHandler, SendTranscriptCommand,
    SendTranscriptHandler,
};

use super::dto::{CallbackRequestDto, ChatHistoryDto, DispatchResponse};

/// Shared state for lead endpoints.
#[derive(Clone)]
pub struct LeadAppState {
    pub send_callback: Arc<SendCallbackHandler>,
    pub send_transcript: Arc<SendTranscriptHandler>,
}

impl LeadAppState {
    pub fn new(
        send_callback: Arc<SendCallbackHandler>,
        send_transcript: Arc<SendTranscriptHandler>,
    ) -> Self {
        Self {
            send_callback,
            send_transcript,
        }
    }
}

/// POST /api/send-email - Email a callback request to the admin inbox.
///
/// # Errors
/// - 400 Bad Request: body is not JSON, or `name`/`email` missing
/// - 500 Internal Server Error: the mail transport failed
pub async fn send_callback(
    State(state): State<LeadAppState>,
    headers: HeaderMap,
    payload: Result<Json<CallbackRequestDto>, JsonRejection>,
) -> Result<Json<DispatchResponse>, LeadApiError> {
    let request_id = request_id(&headers);
    let endpoint = LeadEndpoint::Callback;

    let Json(dto) = payload.map_err(|rejection| {
        log_rejection(&request_id, &rejection);
        LeadApiError::InvalidBody
    })?;

    let cmd = SendCallbackCommand {
        name: dto.name,
        email: dto.email,
        phone: dto.phone,
        message: dto.message,
        request_id,
    };
    state
        .send_callback
        .handle(cmd)
        .await
        .map_err(|err| LeadApiError::from_lead_error(endpoint, err))?;

    Ok(Json(DispatchResponse::sent("Email sent successfully")))
}

/// POST /api/send-chat-history - Email a conversation transcript.
///
/// # Errors
/// - 400 Bad Request: body is not JSON, or `chatHistory` missing
/// - 500 Internal Server Error: the mail transport failed
pub async fn send_chat_history(
    State(state): State<LeadAppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatHistoryDto>, JsonRejection>,
) -> Result<Json<DispatchResponse>, LeadApiError> {
    let request_id = request_id(&headers);
    let endpoint = LeadEndpoint::Transcript;

    let Json(dto) = payload.map_err(|rejection| {
        log_rejection(&request_id, &rejection);
        LeadApiError::InvalidBody
    })?;

    let cmd = SendTranscriptCommand {
        chat_history: dto.chat_history,
        timestamp: dto.timestamp,
        request_id,
    };
    state
        .send_transcript
        .handle(cmd)
        .await
        .map_err(|err| LeadApiError::from_lead_error(endpoint, err))?;

    Ok(Json(DispatchResponse::sent("Chat history sent successfully")))
}

/// Which lead endpoint produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadEndpoint {
    Callback,
    Transcript,
}

impl LeadEndpoint {
    fn missing_fields(self) -> &'static str {
        match self {
            LeadEndpoint::Callback => "Name and email are required",
            LeadEndpoint::Transcript => "Chat history is required",
        }
    }

    fn failed(self) -> &'static str {
        match self {
            LeadEndpoint::Callback => "Failed to send email",
            LeadEndpoint::Transcript => "Failed to send chat history",
        }
    }
}

/// API error for lead endpoints.
#[derive(Debug)]
pub enum LeadApiError {
    InvalidBody,
    MissingFields(LeadEndpoint),
    DispatchFailed(LeadEndpoint),
}

impl LeadApiError {
    fn from_lead_error(endpoint: LeadEndpoint, err: LeadError) -> Self {
        match err {
            LeadError::MissingFields(_) => LeadApiError::MissingFields(endpoint),
            LeadError::Transport(_) => LeadApiError::DispatchFailed(endpoint),
        }
    }
}

impl IntoResponse for LeadApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            LeadApiError::InvalidBody => (StatusCode::BAD_REQUEST, ErrorResponse::new(INVALID_BODY)),
            LeadApiError::MissingFields(endpoint) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(endpoint.missing_fields()),
            ),
            LeadApiError::DispatchFailed(endpoint) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_message(endpoint.failed(), lead_fallback()),
            ),
        };

        (status, Json(error)).into_response()
    }
}
