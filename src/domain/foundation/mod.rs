//! Foundation module - Shared domain primitives.
//!
//! Validation errors and the state machine trait used across the
//! conversation and lead modules.

mod errors;
mod state_machine;

pub use errors::{require_text, ValidationError};
pub use state_machine::StateMachine;
