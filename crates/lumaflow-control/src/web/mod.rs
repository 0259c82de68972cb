//! Web API for observing and steering the shared state.

/// Wire types
pub mod handlers;
/// Route table and request handlers
pub mod routes;
/// Axum HTTP server
pub mod server;

pub use server::{AppState, WebServer, WebServerConfig};
