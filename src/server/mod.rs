//! HTTP API Server
//!
//! Serves the price form at `/` and answers `POST /predict`.
//!
//! The server starts even when the model artifacts fail to load: the form is
//! still served, and every prediction answers 500 until the artifacts are
//! fixed and the process restarted.
//!
//! # Example
//!
//! ```ignore
//! use envios::server::{AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! let state = AppState::load(config);
//! envios::server::serve(state).await?;
//! ```

mod api;
mod handlers;
mod state;

pub use api::{router, serve};
pub use handlers::{index, predict, INDEX_HTML};
pub use state::AppState;

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Port used when neither config nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 5000;

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bind error: {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address
    pub address: SocketAddr,
    /// Directory holding the model, encoders, and column list
    pub artifacts_dir: PathBuf,
    /// Allow cross-origin requests from any origin
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            artifacts_dir: PathBuf::from("."),
            cors_enabled: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    /// Read a YAML config file; missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Keep the host, change the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.address.set_port(port);
        self
    }

    /// Keep the port, change the host
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.address.set_ip(host);
        self
    }

    /// Load artifacts from `dir`
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}

/// Successful prediction body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Price formatted as `"<amount> soles"`
    pub precio_predicho: String,
}

/// Error body for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_server_config_port_preserved(port in 1024u16..65535) {
            let config = ServerConfig::default().with_port(port);
            prop_assert_eq!(config.address.port(), port);
        }

        #[test]
        fn prop_error_response_roundtrip(msg in "[a-zA-Z0-9 ]{1,100}") {
            let json = serde_json::to_string(&ErrorResponse::new(msg.clone())).unwrap();
            let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed.error, msg);
        }
    }
}
