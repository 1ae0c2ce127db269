//! Relay: HTTP surface for the receive→transform→forward→respond pipeline.
//!
//! Single port serves `POST /api/message` (the relay endpoint) and `GET /`
//! (health). Each request is independent; the only suspension point is the
//! outbound call to the upstream service.

mod protocol;
mod server;

pub use protocol::{ErrorResponse, MessageResponse, STATUS_FORWARDED, STATUS_FORWARD_FAILED};
pub use server::run_relay;
