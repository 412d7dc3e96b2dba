//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own state, handlers and routes.

pub mod chat;
pub mod error;
pub mod health;
pub mod leads;
pub mod router;

pub use router::{build_router, AppServices};
