//! Mail Transport Adapters.
//!
//! - `ResendMailTransport` - Resend HTTP email API
//! - `MockMailTransport` - Recording transport for testing

mod mock_transport;
mod resend_transport;

pub use mock_transport::MockMailTransport;
pub use resend_transport::{ResendConfig, ResendMailTransport};
