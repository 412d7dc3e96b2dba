//! Lead capture domain module.
//!
//! Callback requests and chat transcripts, with their fixed email templates.

mod callback;
mod transcript;

pub use callback::{CallbackRequest, NOT_PROVIDED, NO_MESSAGE};
pub use transcript::ChatTranscript;
