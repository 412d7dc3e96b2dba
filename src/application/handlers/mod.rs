//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod conversation;
pub mod leads;

pub use conversation::{SendChatCommand, SendChatError, SendChatHandler, SendChatResult};
pub use leads::{
    LeadError, LeadRouting, SendCallbackCommand, SendCallbackHandler, SendTranscriptCommand,
    SendTranscriptHandler,
};
