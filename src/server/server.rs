//! HTTP transport and server bootstrap
//!
//! A single catch-all handler demultiplexes by method on any path:
//! `OPTIONS` answers preflight, `GET` dispatches query-string payloads
//! (or upgrades to the WebSocket channel), `POST` dispatches buffered
//! JSON bodies, anything else is a 400. When REST is disabled the server
//! degrades to a liveness probe: every request gets an empty 200 and no
//! CORS headers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::engine::Engine;
use crate::observability::Logger;

use super::config::ServerConfig;
use super::dispatch::{Payload, QueryDispatcher};
use super::errors::ServerError;
use super::socket::handle_socket;

/// Shared state handed to every request handler
struct AppState<E> {
    dispatcher: Arc<QueryDispatcher<E>>,
    socket: bool,
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            socket: self.socket,
        }
    }
}

/// Query-serving data server
pub struct DataServer<E> {
    config: ServerConfig,
    dispatcher: Arc<QueryDispatcher<E>>,
}

impl<E: Engine + 'static> DataServer<E> {
    /// Server with default configuration (REST and socket on port 3000)
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, ServerConfig::default())
    }

    pub fn with_config(engine: E, config: ServerConfig) -> Self {
        Self {
            config,
            dispatcher: Arc::new(QueryDispatcher::new(Arc::new(engine))),
        }
    }

    /// Build the router (exposed for tests)
    pub fn router(&self) -> Router {
        if !self.config.rest {
            return Router::new().fallback(liveness);
        }

        let state = AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            socket: self.config.socket,
        };

        // The CORS contract is "these headers on every response", errors
        // and preflight included, so they are stamped as plain response
        // headers rather than negotiated per-request.
        Router::new()
            .fallback(handle_request::<E>)
            .with_state(state)
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static("access-control-request-method"),
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("OPTIONS, POST, GET"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static("2592000"),
            ))
    }

    /// Bind the configured port and serve until the process is terminated
    ///
    /// Bind failure is fatal and is returned to the caller.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let router = self.router();
        let listener = TcpListener::bind(addr).await.inspect_err(|e| {
            Logger::fatal(
                "BIND_FAILED",
                &[
                    ("addr", self.config.socket_addr().as_str()),
                    ("detail", e.to_string().as_str()),
                ],
            );
        })?;

        let port = self.config.port.to_string();
        if self.config.rest {
            let url = self.config.base_url();
            Logger::info("SERVER_START", &[("port", port.as_str()), ("url", url.as_str())]);
        } else {
            Logger::info("SERVER_START", &[("port", port.as_str()), ("rest", "disabled")]);
        }

        axum::serve(listener, router).await
    }
}

/// REST-disabled mode: empty 200 for anything
async fn liveness() -> StatusCode {
    StatusCode::OK
}

async fn handle_request<E: Engine + 'static>(
    State(state): State<AppState<E>>,
    method: Method,
    upgrade: Option<WebSocketUpgrade>,
    Query(params): Query<HashMap<String, String>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match method.as_str() {
        // Preflight never reaches the dispatcher
        "OPTIONS" => StatusCode::OK.into_response(),
        "GET" => {
            if state.socket {
                if let Some(upgrade) = upgrade {
                    let dispatcher = Arc::clone(&state.dispatcher);
                    return upgrade.on_upgrade(move |socket| handle_socket(socket, dispatcher));
                }
            }
            state
                .dispatcher
                .dispatch(Payload::Params(params))
                .await
                .into_response()
        }
        "POST" => match body {
            Ok(bytes) => state
                .dispatcher
                .dispatch(Payload::Body(bytes))
                .await
                .into_response(),
            Err(rejection) => ServerError::BodyRead(rejection.to_string()).into_response(),
        },
        other => ServerError::UnsupportedMethod(other.to_string()).into_response(),
    }
}
