//! Wire types for the control API.
//!
//! The JSON field names and value encodings here are the contract front
//! ends depend on; change them and every dashboard breaks.

use serde::{Deserialize, Serialize};

use lumaflow_core::{format_hex, SharedState, STRIP_COUNT};

/// `GET /status` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Externally supplied tempo estimate
    pub spotify_bpm: f32,
    /// Latest instantaneous loudness
    pub volume_level: f32,
    /// 0 or 1 on the wire
    pub is_beat_drop: u8,
    /// -1 (no sound) through 3 (high)
    pub energy_level: i8,
    /// Opaque scene/effect selector
    pub current_mode: i64,
    /// Current strip colors as lowercase `#rrggbb`
    pub colors: [String; STRIP_COUNT],
}

impl StatusResponse {
    /// Snapshot the shared state. Each field is read under its own guard;
    /// no cross-field atomicity is promised.
    pub fn snapshot(state: &SharedState) -> Self {
        Self {
            spotify_bpm: state.bpm(),
            volume_level: state.volume_level(),
            is_beat_drop: state.is_beat_drop() as u8,
            energy_level: state.energy_tier().as_i8(),
            current_mode: state.mode(),
            colors: state.strip_colors().map(format_hex),
        }
    }
}

/// `POST /set-mode` request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetModeRequest {
    /// Any integer is accepted; stored as-is
    pub mode: i64,
}

/// `POST /set-color` command payload. The `mode` tag selects the variant;
/// only `static` carries data.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SetColorRequest {
    /// Explicit colors, one `#RRGGBB` per strip
    Static {
        /// One hex color per strip, in strip order
        colors: [String; STRIP_COUNT],
    },
    /// Hue sweep across all strips
    FullSpectrum,
    /// Random hue pairs
    Rave,
    /// Halloween palette pairs
    Halloween,
    /// Boiler-room palette pairs
    BoilerRoom,
}

/// Envelope returned by the command endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    /// `"success"` or `"error"`
    pub status: String,
    /// Present on errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandResponse {
    /// The success envelope.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
        }
    }

    /// An error envelope with a caller-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }
}
