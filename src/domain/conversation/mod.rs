//! Conversation domain module.
//!
//! Turns, the history normalizer, and the chat request lifecycle.

mod normalizer;
mod phase;
mod turn;

pub use normalizer::{normalize_history, NormalizedHistory};
pub use phase::ChatPhase;
pub use turn::{IncomingTurn, Speaker, Turn};
