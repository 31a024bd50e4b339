//! arrowgate - SQL query serving over HTTP and WebSocket
//!
//! Clients submit `{ sql, type }` payloads via GET, POST, or a WebSocket
//! text frame and receive JSON rows, an Arrow IPC stream, or an empty
//! acknowledgement. The SQL engine sits behind the [`engine::Engine`]
//! trait; [`engine::FusionEngine`] is the bundled in-memory default.

pub mod cli;
pub mod engine;
pub mod observability;
pub mod server;
