//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! The persona travels in the dedicated `system` parameter, separate from the
//! turn list, and every reply is capped at a fixed `max_tokens` ceiling. The
//! default model is the fast, low-cost Haiku tier.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-3-haiku-20240307")
//!     .with_max_tokens(1024);
//!
//! let provider = AnthropicProvider::new(config)?;
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

/// Default model: fast, low-cost tier.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";

/// Default reply length ceiling.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Reply length ceiling sent with every request.
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(25),
            max_tokens: DEFAULT_MAX_TOKENS,
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

    /// Sets the reply length ceiling.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::Network` if the HTTP client cannot be built.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        // The Messages API requires the first message to come from the user,
        // so an opening widget greeting is not forwarded.
        let messages = request
            .messages
            .iter()
            .skip_while(|turn| turn.speaker == Speaker::Assistant)
            .map(AnthropicMessage::from)
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: self.config.max_tokens,
        }
    }

    /// Sends a request to the messages endpoint.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let anthropic_request = self.to_anthropic_request(request);

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
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

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(anthropic_response)
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model)
            .with_max_output_tokens(self.config.max_tokens)
    }
}

/// Maps a non-success status and its body onto an `AIError`.
fn map_error_status(status: u16, error_body: String) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        // Anthropic rate limit windows tend to be longer than OpenAI's.
        429 => AIError::rate_limited(parse_retry_after(&error_body, 60)),
        400 if error_body.contains("prompt is too long") => AIError::ContextTooLong,
        400 => AIError::InvalidRequest(error_body),
        // Unknown model or wrong base URL; resending will not help.
        404 => AIError::InvalidRequest(error_body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Extracts the first text block as the reply.
fn into_completion(response: AnthropicResponse) -> Result<CompletionResponse, AIError> {
    let content = response
        .content
        .into_iter()
        .find(|block| block.block_type == "text")
        .and_then(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(AIError::EmptyCompletion)?;

    let finish_reason = match response.stop_reason.as_deref() {
        Some("max_tokens") => FinishReason::Length,
        _ => FinishReason::Stop,
    };

    Ok(CompletionResponse {
        content,
        usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        model: response.model,
        finish_reason,
    })
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

impl From<&Turn> for AnthropicMessage {
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
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(AnthropicConfig::new("test-key")).unwrap()
    }

    fn request(turns: Vec<Turn>) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("req-1"))
            .with_messages(turns)
            .with_system_prompt("You are a friendly representative.")
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-3-5-sonnet-latest")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_tokens(512);

        assert_eq!(config.model, "claude-3-5-sonnet-latest");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn defaults_to_haiku_with_length_cap() {
        let info = provider().provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(info.max_output_tokens, Some(1024));
    }

    #[test]
    fn persona_goes_in_system_parameter() {
        let body = serde_json::to_value(
            provider().to_anthropic_request(&request(vec![Turn::user("Hello")])),
        )
        .unwrap();

        assert_eq!(body["system"], "You are a friendly representative.");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["model"], DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(
            body["messages"],
            serde_json::json!([{ "role": "user", "content": "Hello" }])
        );
    }

    #[test]
    fn leading_assistant_greeting_is_not_forwarded() {
        let req = request(vec![
            Turn::assistant("Hi! How can we help?"),
            Turn::user("AC is broken"),
            Turn::assistant("Sorry! What's your address?"),
            Turn::user("123 Main St"),
        ]);
        let body = serde_json::to_value(provider().to_anthropic_request(&req)).unwrap();

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let provider = AnthropicProvider::new(
            AnthropicConfig::new("k").with_base_url("http://localhost:9000/"),
        )
        .unwrap();
        assert_eq!(provider.messages_url(), "http://localhost:9000/v1/messages");
    }

    #[test]
    fn into_completion_takes_first_text_block() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{
                "model": "claude-3-haiku-20240307",
                "content": [
                    {"type": "text", "text": "We handle all AC repairs."},
                    {"type": "text", "text": "ignored"}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 900, "output_tokens": 12}
            }"#,
        )
        .unwrap();

        let completion = into_completion(response).unwrap();
        assert_eq!(completion.content, "We handle all AC repairs.");
        assert_eq!(completion.usage.total_tokens, 912);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn into_completion_reports_length_stop() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"model":"m","content":[{"type":"text","text":"cut"}],
                "stop_reason":"max_tokens","usage":{"input_tokens":1,"output_tokens":1024}}"#,
        )
        .unwrap();
        assert_eq!(
            into_completion(response).unwrap().finish_reason,
            FinishReason::Length
        );
    }

    #[test]
    fn into_completion_rejects_empty_content() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"model":"m","content":[],"stop_reason":"end_turn","usage":{"input_tokens":1,"output_tokens":0}}"#,
        )
        .unwrap();
        assert!(matches!(
            into_completion(response),
            Err(AIError::EmptyCompletion)
        ));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            map_error_status(401, String::new()),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            map_error_status(429, r#"{"error":{"message":"slow"}}"#.to_string()),
            AIError::RateLimited { retry_after_secs: 60 }
        ));
        assert!(matches!(
            map_error_status(400, "prompt is too long: 210000 tokens".to_string()),
            AIError::ContextTooLong
        ));
        assert!(matches!(
            map_error_status(400, "messages: field required".to_string()),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(
            map_error_status(529, "overloaded".to_string()),
            AIError::Unavailable { .. }
        ));
    }

    #[test]
    fn unknown_model_is_not_transient() {
        let err = map_error_status(
            404,
            r#"{"type":"error","error":{"type":"not_found_error","message":"model: claude-nope"}}"#
                .to_string(),
        );

        assert!(matches!(err, AIError::InvalidRequest(ref body) if body.contains("claude-nope")));
        assert!(!err.is_transient());
    }
}
