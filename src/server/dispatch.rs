//! Query dispatch
//!
//! Interprets a raw payload as a [`QueryDescriptor`], runs the matching
//! engine operation, and times the whole exchange. Dispatch holds no
//! locks; concurrent requests interleave freely and any serialization is
//! the engine's business.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;

use crate::engine::Engine;
use crate::observability::Logger;

use super::errors::ServerResult;
use super::request::{QueryDescriptor, ResponseFormat};
use super::response::QueryResponse;

/// Raw request payload, before parsing
#[derive(Debug, Clone)]
pub enum Payload {
    /// GET: query-string parameters, already a string map
    Params(HashMap<String, String>),
    /// POST: buffered body bytes, expected to be UTF-8 JSON text
    Body(Bytes),
}

/// Routes parsed queries to the shared engine handle
pub struct QueryDispatcher<E> {
    engine: Arc<E>,
}

impl<E: Engine> QueryDispatcher<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self { engine }
    }

    /// Handle one request payload end to end
    ///
    /// Logs a `REQUEST` timing line (wall-clock milliseconds, one decimal
    /// place) whether dispatch succeeded or failed.
    pub async fn dispatch(&self, payload: Payload) -> ServerResult<QueryResponse> {
        let started = Instant::now();
        let result = self.run(payload).await;

        let elapsed_ms = format!("{:.1}", started.elapsed().as_secs_f64() * 1000.0);
        Logger::info("REQUEST", &[("elapsed_ms", elapsed_ms.as_str())]);

        result
    }

    async fn run(&self, payload: Payload) -> ServerResult<QueryResponse> {
        let query = match payload {
            Payload::Params(params) => QueryDescriptor::from_params(&params)?,
            Payload::Body(bytes) => QueryDescriptor::from_json_bytes(&bytes)?,
        };

        // Diagnostic only: raw SQL goes to the trace log unescaped
        let mut fields: Vec<(&str, &str)> = Vec::new();
        if !query.sql.is_empty() {
            fields.push(("sql", query.sql.as_str()));
        }
        Logger::trace(query.format.tag(), &fields);

        match query.format {
            ResponseFormat::Exec => {
                self.engine.execute(&query.sql).await?;
                Ok(QueryResponse::Done)
            }
            ResponseFormat::Json => {
                let rows = self.engine.query_rows(&query.sql).await?;
                Ok(QueryResponse::Rows(rows))
            }
            ResponseFormat::Arrow => {
                let bytes = self.engine.query_columnar(&query.sql).await?;
                Ok(QueryResponse::Arrow(bytes))
            }
        }
    }
}
