//! WebSocket query channel
//!
//! Same `{ "sql", "type" }` payload as the HTTP protocol, one query per
//! text frame. Replies: a JSON text frame for `json`, a binary frame for
//! `arrow`, an empty-object text frame for a successful `exec`. There are
//! no status codes on this channel, so failures come back as a text frame
//! with an `error` key (and are still logged server-side).

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::engine::Engine;
use crate::observability::Logger;

use super::dispatch::{Payload, QueryDispatcher};
use super::errors::ServerResult;
use super::response::QueryResponse;

/// Map a dispatch outcome onto a single WebSocket frame
pub(crate) fn socket_reply(result: ServerResult<QueryResponse>) -> Message {
    match result {
        Ok(QueryResponse::Done) => Message::Text("{}".to_string()),
        Ok(QueryResponse::Rows(rows)) => Message::Text(rows.to_string()),
        Ok(QueryResponse::Arrow(bytes)) => Message::Binary(bytes),
        Err(err) => {
            let detail = err.to_string();
            Logger::error("REQUEST_FAILED", &[("channel", "socket"), ("detail", &detail)]);
            Message::Text(serde_json::json!({ "error": detail }).to_string())
        }
    }
}

/// Serve one WebSocket connection until the peer closes it
pub(crate) async fn handle_socket<E: Engine + 'static>(
    socket: WebSocket,
    dispatcher: Arc<QueryDispatcher<E>>,
) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let payload = Payload::Body(Bytes::from(text.into_bytes()));
                let reply = socket_reply(dispatcher.dispatch(payload).await);
                if sender.send(reply).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = sender.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            // Binary and pong frames carry no queries
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use crate::server::errors::ServerError;

    #[test]
    fn test_rows_become_text_frame() {
        let reply = socket_reply(Ok(QueryResponse::Rows(serde_json::json!([{"x": 1}]))));
        match reply {
            Message::Text(text) => assert_eq!(text, r#"[{"x":1}]"#),
            other => panic!("expected text frame, got {:?}", other),
        }
    }

    #[test]
    fn test_arrow_becomes_binary_frame() {
        let reply = socket_reply(Ok(QueryResponse::Arrow(vec![0xff, 0xff, 0xff, 0xff])));
        match reply {
            Message::Binary(bytes) => assert_eq!(bytes, vec![0xff, 0xff, 0xff, 0xff]),
            other => panic!("expected binary frame, got {:?}", other),
        }
    }

    #[test]
    fn test_exec_success_is_empty_object() {
        let reply = socket_reply(Ok(QueryResponse::Done));
        match reply {
            Message::Text(text) => assert_eq!(text, "{}"),
            other => panic!("expected text frame, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_carries_error_key() {
        let reply = socket_reply(Err(ServerError::Engine(EngineError::Sql("bad".into()))));
        match reply {
            Message::Text(text) => {
                let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert!(parsed["error"].as_str().unwrap().contains("bad"));
            }
            other => panic!("expected text frame, got {:?}", other),
        }
    }
}
