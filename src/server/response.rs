//! Response envelopes
//!
//! One envelope per request, produced exactly once; conversion to an HTTP
//! response consumes it. All success header-setting lives here.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

/// MIME type for Arrow IPC stream bodies
pub const ARROW_STREAM_MIME: &str = "application/vnd.apache.arrow.stream";

/// Successful dispatch outcome
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    /// Statement executed, nothing to return (200, empty body)
    Done,
    /// Result rows as a JSON array (`application/json`)
    Rows(Value),
    /// Columnar result as Arrow IPC bytes (`application/vnd.apache.arrow.stream`)
    Arrow(Vec<u8>),
}

impl IntoResponse for QueryResponse {
    fn into_response(self) -> Response {
        match self {
            QueryResponse::Done => StatusCode::OK.into_response(),
            QueryResponse::Rows(rows) => Json(rows).into_response(),
            QueryResponse::Arrow(bytes) => {
                ([(header::CONTENT_TYPE, ARROW_STREAM_MIME)], bytes).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_is_empty_200() {
        let response = QueryResponse::Done.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_rows_sets_json_content_type() {
        let response = QueryResponse::Rows(serde_json::json!([{"x": 1}])).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_arrow_sets_stream_content_type() {
        let response = QueryResponse::Arrow(vec![0xff, 0xff, 0xff, 0xff]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            ARROW_STREAM_MIME
        );
    }
}
