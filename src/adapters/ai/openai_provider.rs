//! OpenAI Provider - Implementation of AIProvider for OpenAI's Chat Completions API.
//!
//! The Chat Completions call has no separate system parameter, so the persona
//! is sent as the first `system` message of the same list, followed by the
//! history and the visitor's new message. No `max_tokens` is sent; the model
//! decides reply length.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::{Speaker, Turn};
use crate::ports::{
    parse_retry_after, AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};

/// Default model: general-purpose tier.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o", "gpt-4-turbo").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(25),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::Network` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system",
                content: prompt.clone(),
            });
        }

        messages.extend(request.messages.iter().map(OpenAIMessage::from));

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
        }
    }

    /// Sends a request to the completions endpoint.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_error_status(status.as_u16(), error_body))
    }

    /// Parses a non-streaming response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(openai_response)
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

/// Maps a non-success status and its body onto an `AIError`.
fn map_error_status(status: u16, error_body: String) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&error_body, 30)),
        400 if error_body.contains("maximum context length")
            || error_body.contains("context_length_exceeded") =>
        {
            AIError::ContextTooLong
        }
        400 => AIError::InvalidRequest(error_body),
        // Unknown model or wrong base URL; resending will not help.
        404 => AIError::InvalidRequest(error_body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Extracts the first choice as the reply.
fn into_completion(response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let content = choice
        .message
        .content
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| match finish_reason {
            FinishReason::ContentFilter => AIError::content_filtered("completion withheld"),
            _ => AIError::EmptyCompletion,
        })?;

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: response.model,
        finish_reason,
    })
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: String,
}

impl From<&Turn> for OpenAIMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: match turn.speaker {
                Speaker::Assistant => "assistant",
                Speaker::User => "user",
            },
            content: turn.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4-turbo")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn provider_info_has_no_length_cap() {
        let info = provider().provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(info.max_output_tokens, None);
    }

    #[test]
    fn persona_is_first_message_followed_by_history() {
        let request = CompletionRequest::new(RequestMetadata::new("req-1"))
            .with_messages(vec![
                Turn::assistant("Hi! How can we help?"),
                Turn::user("Do you install Nest thermostats?"),
            ])
            .with_system_prompt("You are a friendly representative.");

        let body = serde_json::to_value(provider().to_openai_request(&request)).unwrap();

        assert_eq!(
            body["messages"],
            serde_json::json!([
                { "role": "system", "content": "You are a friendly representative." },
                { "role": "assistant", "content": "Hi! How can we help?" },
                { "role": "user", "content": "Do you install Nest thermostats?" }
            ])
        );
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider =
            OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://localhost:9000/v1/"))
                .unwrap();
        assert_eq!(
            provider.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn into_completion_takes_first_choice() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{
                "model": "gpt-4o-2024-08-06",
                "choices": [
                    {"message": {"role": "assistant", "content": "Yes, we install Nest."}, "finish_reason": "stop"},
                    {"message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 700, "completion_tokens": 8}
            }"#,
        )
        .unwrap();

        let completion = into_completion(response).unwrap();
        assert_eq!(completion.content, "Yes, we install Nest.");
        assert_eq!(completion.usage.total_tokens, 708);
        assert_eq!(completion.model, "gpt-4o-2024-08-06");
    }

    #[test]
    fn into_completion_without_choices_is_parse_error() {
        let response: OpenAIResponse =
            serde_json::from_str(r#"{"model":"gpt-4o","choices":[]}"#).unwrap();
        assert!(matches!(into_completion(response), Err(AIError::Parse(_))));
    }

    #[test]
    fn into_completion_null_content_after_filter() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"model":"gpt-4o","choices":[{"message":{"content":null},"finish_reason":"content_filter"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            into_completion(response),
            Err(AIError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            map_error_status(401, String::new()),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            map_error_status(
                429,
                r#"{"error":{"message":"Please try again in 20s."}}"#.to_string()
            ),
            AIError::RateLimited { retry_after_secs: 20 }
        ));
        assert!(matches!(
            map_error_status(400, "context_length_exceeded".to_string()),
            AIError::ContextTooLong
        ));
        assert!(matches!(
            map_error_status(503, String::new()),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(
            map_error_status(418, String::new()),
            AIError::Network(_)
        ));
    }

    #[test]
    fn unknown_model_is_not_transient() {
        let err = map_error_status(
            404,
            r#"{"error":{"code":"model_not_found","message":"The model `gpt-nope` does not exist"}}"#
                .to_string(),
        );

        assert!(matches!(err, AIError::InvalidRequest(ref body) if body.contains("gpt-nope")));
        assert!(!err.is_transient());
    }
}
