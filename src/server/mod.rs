//! Query-serving HTTP and WebSocket front-end
//!
//! A thin protocol layer over the engine seam:
//! - transport: method demux, CORS stamping, body buffering ([`DataServer`])
//! - dispatch: payload parsing, routing, request timing ([`QueryDispatcher`])
//! - encoding: envelopes, content types, status codes ([`QueryResponse`])
//!
//! Requests are independent; there is no cross-request ordering, no
//! cancellation, and no locking above the engine.

mod config;
mod dispatch;
mod errors;
mod request;
mod response;
#[allow(clippy::module_inception)]
mod server;
mod socket;

pub use config::ServerConfig;
pub use dispatch::{Payload, QueryDispatcher};
pub use errors::{ServerError, ServerResult};
pub use request::{QueryDescriptor, ResponseFormat};
pub use response::{QueryResponse, ARROW_STREAM_MIME};
pub use server::DataServer;
