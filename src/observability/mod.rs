//! Observability for arrowgate
//!
//! Structured diagnostic logging: query traces and request timings on
//! stdout, error events on stderr. One log line = one event.

mod logger;

pub use logger::{Logger, Severity};
