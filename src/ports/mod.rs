//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Completion call against the active LLM provider
//! - `MailTransport` - Outbound plain-text email

mod ai_provider;
mod mail_transport;

pub(crate) use ai_provider::parse_retry_after;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestMetadata, TokenUsage,
};
pub use mail_transport::{MailError, MailTransport, OutgoingEmail};
