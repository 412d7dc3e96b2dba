//! Resend Transport - Implementation of MailTransport over Resend's HTTP API.
//!
//! Sends plain-text email with a single `POST /emails` call. The `from`
//! header is fixed by configuration.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{MailError, MailTransport, OutgoingEmail};

/// Configuration for the Resend transport.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Formatted `From` header, e.g. `AMW Chatbot <chatbot@example.com>`.
    pub from: String,
    /// Base URL for the API (default: https://api.resend.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ResendConfig {
    /// Creates a new configuration.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(15),
        }
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

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Mail transport backed by Resend.
pub struct ResendMailTransport {
    config: ResendConfig,
    client: Client,
}

impl ResendMailTransport {
    /// Creates a new transport.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Network` if the HTTP client cannot be built.
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn to_resend_request<'a>(&'a self, email: &'a OutgoingEmail) -> ResendRequest<'a> {
        ResendRequest {
            from: &self.config.from,
            to: vec![email.to.as_str()],
            subject: &email.subject,
            text: &email.body,
        }
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, MailError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_error_status(status.as_u16(), error_body))
    }
}

#[async_trait]
impl MailTransport for ResendMailTransport {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_resend_request(&email))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    MailError::Network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        // The id is only useful for correlating with the Resend dashboard.
        if let Ok(sent) = response.json::<ResendResponse>().await {
            tracing::debug!(resend_id = %sent.id, "Email accepted by transport");
        }

        Ok(())
    }
}

fn map_error_status(status: u16, error_body: String) -> MailError {
    match status {
        401 | 403 => MailError::Unauthorized,
        400 | 422 => MailError::Rejected(error_body),
        _ => MailError::Unavailable(format!("Status {}: {}", status, error_body)),
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}
