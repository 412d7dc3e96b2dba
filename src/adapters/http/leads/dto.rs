//! HTTP DTOs for lead notification endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/send-email`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/send-chat-history`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryDto {
    #[serde(default)]
    pub chat_history: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Successful dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub message: &'static str,
}

impl DispatchResponse {
    pub fn sent(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
