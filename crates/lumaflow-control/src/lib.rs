//! LumaFlow Control - HTTP Control Plane
//!
//! This crate exposes the shared signal state to external callers:
//! - **Web API**: a small JSON-over-HTTP contract (`/status`, `/set-mode`,
//!   `/set-color`) consumed by GUIs and dashboards
//! - **Tempo feed**: an optional Spotify poller writing tempo estimates
//!   into the shared state's bpm field
//!
//! Everything communicates through `lumaflow_core::SharedState`; no
//! component here calls the analyzer or animator directly.

#![warn(missing_docs)]

/// Error types
pub mod error;
/// External tempo feed (Spotify)
pub mod tempo;
/// Web API server
pub mod web;

pub use error::{ControlError, Result};
pub use tempo::{fetch_access_token, TempoFeed, TempoFeedConfig};
pub use web::{AppState, WebServer, WebServerConfig};
