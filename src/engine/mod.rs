//! # Query Engine Seam
//!
//! The server fronts an opaque SQL engine reached through the [`Engine`]
//! trait: one side-effecting operation and two result-bearing ones (row
//! JSON and columnar Arrow IPC bytes). The engine owns any serialization
//! its internals need; the server layers above hold no locks and make no
//! ordering promises across requests.
//!
//! [`FusionEngine`] is the default implementation, an in-memory
//! DataFusion session.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod fusion;

pub use fusion::FusionEngine;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine failures
///
/// All variants are surfaced to HTTP clients as a bare 500; the detail
/// string only ever reaches the server-side log.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// SQL rejected or failed at runtime (syntax, planning, execution)
    #[error("SQL error: {0}")]
    Sql(String),

    /// Result set could not be encoded into the requested format
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// SQL-capable engine collaborator
///
/// Operations may fail with an arbitrary error; callers convert failures
/// into server errors at the dispatch boundary.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Run a side-effecting statement; no return payload
    async fn execute(&self, sql: &str) -> EngineResult<()>;

    /// Run a query and return its rows as a JSON array
    async fn query_rows(&self, sql: &str) -> EngineResult<Value>;

    /// Run a query and return its result as an Arrow IPC stream
    async fn query_columnar(&self, sql: &str) -> EngineResult<Vec<u8>>;
}
