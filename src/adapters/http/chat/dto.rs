//! HTTP DTOs for the chat endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::IncomingTurn;

/// Body of `POST /api/chat`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as "Missing required fields" rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Option<Vec<IncomingTurn>>,
    #[serde(default)]
    pub user_message: Option<String>,
}

/// Successful chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,
}
