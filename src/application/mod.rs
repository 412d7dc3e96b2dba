//! Application layer - Command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers hold their ports behind `Arc<dyn ...>` and are shared read-only
//! across requests.

pub mod handlers;

pub use handlers::{
    // Conversation handlers
    SendChatCommand, SendChatError, SendChatHandler, SendChatResult,
    // Lead handlers
    LeadError, LeadRouting, SendCallbackCommand, SendCallbackHandler, SendTranscriptCommand,
    SendTranscriptHandler,
};
