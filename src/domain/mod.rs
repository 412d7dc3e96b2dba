//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (validation errors, state machine trait)
//! - `persona` - The fixed assistant persona and business constants
//! - `conversation` - Turns, history normalization, chat request lifecycle
//! - `leads` - Callback requests and transcript exports

pub mod conversation;
pub mod foundation;
pub mod leads;
pub mod persona;
