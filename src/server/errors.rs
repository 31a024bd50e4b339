//! Server error taxonomy
//!
//! Three classes of failure: protocol errors the caller must fix (400),
//! engine failures (500), and transport failures while reading a request
//! body (500). Error responses carry no body; the detail is logged
//! server-side before the response is written.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::engine::EngineError;
use crate::observability::Logger;

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Request handling errors
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    // ==================
    // Protocol errors (400)
    // ==================
    /// Request payload was not valid JSON
    #[error("Invalid query payload: {0}")]
    InvalidPayload(String),

    /// HTTP method other than OPTIONS / GET / POST
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// `type` value outside exec / json / arrow
    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    // ==================
    // Server errors (500)
    // ==================
    /// Request body stream failed mid-read
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// Engine rejected or failed the statement
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ServerError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ServerError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            ServerError::UnrecognizedCommand(_) => StatusCode::BAD_REQUEST,
            ServerError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    /// Log the failure, then respond with a bare status code.
    ///
    /// The body stays empty on purpose: engine and transport detail is a
    /// server-side concern, not part of the wire contract.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();
        Logger::error(
            "REQUEST_FAILED",
            &[("detail", detail.as_str()), ("status", status.as_str())],
        );
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_errors_are_client_errors() {
        assert_eq!(
            ServerError::InvalidPayload("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::UnsupportedMethod("PUT".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::UnrecognizedCommand("csv".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_engine_and_transport_errors_are_server_errors() {
        assert_eq!(
            ServerError::Engine(EngineError::Sql("nope".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::BodyRead("reset".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_has_empty_body() {
        let response = ServerError::UnrecognizedCommand("csv".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // No content type, no payload
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = ServerError::UnsupportedMethod("DELETE".into());
        assert_eq!(err.to_string(), "Unsupported HTTP method: DELETE");
        let err = ServerError::UnrecognizedCommand("csv".into());
        assert_eq!(err.to_string(), "Unrecognized command: csv");
    }
}
