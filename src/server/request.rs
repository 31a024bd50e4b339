//! Query request parsing
//!
//! A request payload arrives either as a flat string map (GET query
//! parameters) or as raw JSON bytes (POST body). Both parse into a
//! [`QueryDescriptor`], the only shape the dispatcher understands.
//! The descriptor is request-scoped and discarded after the response.

use std::collections::HashMap;

use serde::Deserialize;

use super::errors::{ServerError, ServerResult};

/// Requested response format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Side-effecting statement, empty response
    Exec,
    /// Rows as a JSON array
    Json,
    /// Arrow IPC byte stream
    Arrow,
}

impl ResponseFormat {
    /// Parse a `type` value; missing or empty defaults to `json`
    pub fn parse(value: &str) -> ServerResult<Self> {
        match value {
            "exec" => Ok(ResponseFormat::Exec),
            "json" | "" => Ok(ResponseFormat::Json),
            "arrow" => Ok(ResponseFormat::Arrow),
            other => Err(ServerError::UnrecognizedCommand(other.to_string())),
        }
    }

    /// Uppercase tag used in query trace logs
    pub fn tag(&self) -> &'static str {
        match self {
            ResponseFormat::Exec => "EXEC",
            ResponseFormat::Json => "JSON",
            ResponseFormat::Arrow => "ARROW",
        }
    }
}

/// Raw wire shape of a query payload
///
/// Unknown keys are ignored. `sql` defaults to the empty string and is
/// passed through to the engine unvalidated; the engine rejects what it
/// cannot run.
#[derive(Debug, Deserialize)]
struct RawQuery {
    #[serde(default)]
    sql: String,
    #[serde(default, rename = "type")]
    format: String,
}

/// Parsed, validated query request
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    pub sql: String,
    pub format: ResponseFormat,
}

impl QueryDescriptor {
    /// Parse a POST body: UTF-8 JSON text of `{ "sql", "type" }`
    pub fn from_json_bytes(bytes: &[u8]) -> ServerResult<Self> {
        let raw: RawQuery = serde_json::from_slice(bytes)
            .map_err(|e| ServerError::InvalidPayload(e.to_string()))?;
        let format = ResponseFormat::parse(&raw.format)?;
        Ok(Self {
            sql: raw.sql,
            format,
        })
    }

    /// Parse GET query parameters; keys beyond `sql` and `type` are ignored
    pub fn from_params(params: &HashMap<String, String>) -> ServerResult<Self> {
        let sql = params.get("sql").cloned().unwrap_or_default();
        let format = ResponseFormat::parse(params.get("type").map_or("", String::as_str))?;
        Ok(Self { sql, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_post_body_full() {
        let query =
            QueryDescriptor::from_json_bytes(br#"{"sql":"SELECT 1","type":"arrow"}"#).unwrap();
        assert_eq!(query.sql, "SELECT 1");
        assert_eq!(query.format, ResponseFormat::Arrow);
    }

    #[test]
    fn test_missing_type_defaults_to_json() {
        let query = QueryDescriptor::from_json_bytes(br#"{"sql":"SELECT 1"}"#).unwrap();
        assert_eq!(query.format, ResponseFormat::Json);

        let query = QueryDescriptor::from_params(&params(&[("sql", "SELECT 1")])).unwrap();
        assert_eq!(query.format, ResponseFormat::Json);
    }

    #[test]
    fn test_empty_type_defaults_to_json() {
        let query =
            QueryDescriptor::from_params(&params(&[("sql", "SELECT 1"), ("type", "")])).unwrap();
        assert_eq!(query.format, ResponseFormat::Json);
    }

    #[test]
    fn test_missing_sql_passes_through_empty() {
        let query = QueryDescriptor::from_json_bytes(br#"{"type":"exec"}"#).unwrap();
        assert_eq!(query.sql, "");
        assert_eq!(query.format, ResponseFormat::Exec);
    }

    #[test]
    fn test_unrecognized_type_is_rejected() {
        let err = QueryDescriptor::from_json_bytes(br#"{"sql":"x","type":"csv"}"#).unwrap_err();
        assert!(matches!(err, ServerError::UnrecognizedCommand(t) if t == "csv"));

        let err = QueryDescriptor::from_params(&params(&[("type", "csv")])).unwrap_err();
        assert!(matches!(err, ServerError::UnrecognizedCommand(_)));
    }

    #[test]
    fn test_malformed_json_is_invalid_payload() {
        let err = QueryDescriptor::from_json_bytes(b"not json").unwrap_err();
        assert!(matches!(err, ServerError::InvalidPayload(_)));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let query = QueryDescriptor::from_json_bytes(
            br#"{"sql":"SELECT 1","type":"json","client":"dashboard"}"#,
        )
        .unwrap();
        assert_eq!(query.sql, "SELECT 1");

        let query = QueryDescriptor::from_params(&params(&[
            ("sql", "SELECT 1"),
            ("cachebust", "123"),
        ]))
        .unwrap();
        assert_eq!(query.sql, "SELECT 1");
    }
}
