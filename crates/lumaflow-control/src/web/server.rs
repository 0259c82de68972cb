//! Axum HTTP server

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

use lumaflow_core::SharedState;

use crate::{error::ControlError, Result};

use super::routes::build_router;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// The process-wide signal state
    pub shared: Arc<SharedState>,
}

/// Web server configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WebServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allow cross-origin requests (browser dashboards)
    pub enable_cors: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            // Secure by default: bind to localhost to prevent accidental
            // network exposure
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl WebServerConfig {
    /// Create a new web server config
    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Set the host address
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Set CORS enabled/disabled
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }
}

/// Web server for the control API
pub struct WebServer {
    config: WebServerConfig,
    shared: Arc<SharedState>,
}

impl WebServer {
    /// Create a new web server over the shared state
    pub fn new(config: WebServerConfig, shared: Arc<SharedState>) -> Self {
        Self { config, shared }
    }

    /// Run the web server (blocking)
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| ControlError::HttpError(format!("Invalid address: {}", e)))?;

        let state = AppState {
            shared: self.shared,
        };

        let app = build_router().with_state(state);

        // Add CORS if enabled
        let app = if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_origin(Any),
            )
        } else {
            app
        };

        tracing::info!("Control API listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ControlError::HttpError(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app.into_make_service())
            .await
            .map_err(|e| ControlError::HttpError(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Spawn the server in a background task
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}
