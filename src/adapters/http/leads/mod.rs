//! HTTP adapter for lead notification endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CallbackRequestDto, ChatHistoryDto, DispatchResponse};
pub use handlers::{LeadApiError, LeadAppState, LeadEndpoint};
pub use routes::lead_routes;
