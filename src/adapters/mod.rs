//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Anthropic and OpenAI completion providers
//! - `email` - Resend mail transport
//! - `http` - Axum REST endpoints

pub mod ai;
pub mod email;
pub mod http;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use email::{MockMailTransport, ResendConfig, ResendMailTransport};
pub use http::{build_router, AppServices};
