//! CLI-specific error types
//!
//! Every CLI error is fatal; main prints it and exits non-zero.

use thiserror::Error;

use crate::engine::EngineError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// A --load path has no usable table name
    #[error("cannot derive a table name from '{0}'")]
    BadTableName(String),

    /// A --load file failed to register
    #[error("failed to load '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: EngineError,
    },

    /// Tokio runtime construction failed
    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),

    /// Server bind or serve failure
    #[error("server failed: {0}")]
    Server(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_the_file() {
        let err = CliError::Load {
            path: "flights.csv".to_string(),
            source: EngineError::Sql("no such file".to_string()),
        };
        assert!(err.to_string().contains("flights.csv"));
    }
}
