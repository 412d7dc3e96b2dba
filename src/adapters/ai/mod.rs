//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port. Exactly one is active per
//! deployment, selected by configuration.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Claude Messages API (persona as `system`, capped replies)
//! - `OpenAIProvider` - Chat Completions API (persona as leading system message)
//! - `MockAIProvider` - Configurable mock for testing

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, DEFAULT_ANTHROPIC_MODEL, DEFAULT_MAX_TOKENS,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_OPENAI_MODEL};
