//! DataFusion-backed engine
//!
//! An in-memory [`SessionContext`] behind the [`Engine`] trait. Rows are
//! serialized through Arrow's JSON `ArrayWriter`, columnar results through
//! the Arrow IPC `StreamWriter`. Tables live for the process lifetime;
//! nothing is persisted.

use std::sync::Arc;

use async_trait::async_trait;
use datafusion::arrow::datatypes::Schema;
use datafusion::arrow::ipc::writer::StreamWriter;
use datafusion::arrow::json::ArrayWriter;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::error::DataFusionError;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use serde_json::Value;

use super::{Engine, EngineError, EngineResult};

impl From<DataFusionError> for EngineError {
    fn from(e: DataFusionError) -> Self {
        EngineError::Sql(e.to_string())
    }
}

/// In-memory DataFusion engine
pub struct FusionEngine {
    ctx: SessionContext,
}

impl FusionEngine {
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(),
        }
    }

    /// Register a CSV file as a queryable table
    pub async fn load_csv(&self, table: &str, path: &str) -> EngineResult<()> {
        self.ctx
            .register_csv(table, path, CsvReadOptions::new())
            .await?;
        Ok(())
    }

    /// Plan and run a statement, collecting all result batches
    ///
    /// DDL and DML statements also go through here: DataFusion only
    /// applies their side effects once the plan is executed.
    async fn collect(&self, sql: &str) -> EngineResult<Vec<RecordBatch>> {
        let frame = self.ctx.sql(sql).await?;
        Ok(frame.collect().await?)
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for FusionEngine {
    async fn execute(&self, sql: &str) -> EngineResult<()> {
        self.collect(sql).await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str) -> EngineResult<Value> {
        let batches = self.collect(sql).await?;

        let mut buf = Vec::new();
        {
            let mut writer = ArrayWriter::new(&mut buf);
            writer
                .write_batches(&batches.iter().collect::<Vec<_>>())
                .map_err(|e| EngineError::Encoding(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| EngineError::Encoding(e.to_string()))?;
        }

        // ArrayWriter emits nothing for an empty result set
        if buf.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        serde_json::from_slice(&buf).map_err(|e| EngineError::Encoding(e.to_string()))
    }

    async fn query_columnar(&self, sql: &str) -> EngineResult<Vec<u8>> {
        let batches = self.collect(sql).await?;

        let schema = batches
            .first()
            .map(|batch| batch.schema())
            .unwrap_or_else(|| Arc::new(Schema::empty()));

        let mut buf = Vec::new();
        {
            let mut writer = StreamWriter::try_new(&mut buf, schema.as_ref())
                .map_err(|e| EngineError::Encoding(e.to_string()))?;
            for batch in &batches {
                writer
                    .write(batch)
                    .map_err(|e| EngineError::Encoding(e.to_string()))?;
            }
            writer
                .finish()
                .map_err(|e| EngineError::Encoding(e.to_string()))?;
        }

        Ok(buf)
    }
}
