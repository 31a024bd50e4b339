//! Server configuration
//!
//! The whole surface is `{ rest, socket, port }` plus a bind host. No
//! environment variables, no config files.

use serde::{Deserialize, Serialize};

/// Data server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Enable the HTTP query protocol; when false every request gets an
    /// empty 200 (liveness-probe-only mode)
    #[serde(default = "default_rest")]
    pub rest: bool,

    /// Enable the WebSocket query channel
    #[serde(default = "default_socket")]
    pub socket: bool,

    /// TCP port to bind (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_rest() -> bool {
    true
}

fn default_socket() -> bool {
    true
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rest: default_rest(),
            socket: default_socket(),
            port: default_port(),
            host: default_host(),
        }
    }
}

impl ServerConfig {
    /// Config with a specific port, everything else default
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Bind address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL announced at startup when REST is enabled
    pub fn base_url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert!(config.rest);
        assert!(config.socket);
        assert_eq!(config.port, 3000);
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_empty_json_deserializes_to_defaults() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert!(config.rest);
        assert!(config.socket);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"rest": false, "port": 8080}"#).unwrap();
        assert!(!config.rest);
        assert!(config.socket);
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url(), "http://localhost:8080/");
    }

    #[test]
    fn test_with_port() {
        let config = ServerConfig::with_port(4000);
        assert_eq!(config.socket_addr(), "0.0.0.0:4000");
        assert!(config.rest);
    }
}
