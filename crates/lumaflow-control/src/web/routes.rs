//! Route table and request handlers.
//!
//! Error conventions follow the original contract: malformed JSON is the
//! only HTTP-level failure (400); every other problem, including unknown
//! paths, comes back as a 200 with the `{"status":"error",...}` envelope.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tracing::{info, warn};

use lumaflow_core::{color::parse_hex, ColorMode, STRIP_COUNT};

use super::handlers::{CommandResponse, SetColorRequest, SetModeRequest, StatusResponse};
use super::server::AppState;

/// Build the API router.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/status", get(get_status))
        .route("/set-mode", post(set_mode))
        .route("/set-color", post(set_color))
        .fallback(unknown_endpoint)
}

/// GET / - static dashboard page (collaborator resource, not core)
async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// GET /status - snapshot of the derived signals and strip colors
async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::snapshot(&state.shared))
}

/// POST /set-mode - overwrite the opaque scene/effect selector
async fn set_mode(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<CommandResponse>) {
    let request: SetModeRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CommandResponse::error("Invalid JSON")),
            )
        }
    };

    state.shared.set_mode(request.mode);
    info!(mode = request.mode, "mode received");
    (StatusCode::OK, Json(CommandResponse::success()))
}

/// POST /set-color - switch the color mode, or set explicit static colors
async fn set_color(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<CommandResponse>) {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CommandResponse::error("Invalid JSON")),
            )
        }
    };

    // Validate the mode tag before interpreting the rest of the payload.
    let known_tag = matches!(
        value.get("mode").and_then(Value::as_str),
        Some("static" | "full_spectrum" | "rave" | "halloween" | "boiler_room")
    );
    if !known_tag {
        return (
            StatusCode::OK,
            Json(CommandResponse::error("Invalid color mode")),
        );
    }

    let request: SetColorRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!("malformed set-color payload: {e}");
            return (
                StatusCode::OK,
                Json(CommandResponse::error("Invalid color payload")),
            );
        }
    };

    match request {
        SetColorRequest::Static { colors } => {
            // Parse all four before writing any, so a bad value leaves
            // the strips untouched.
            let mut packed = [0u32; STRIP_COUNT];
            for (i, hex) in colors.iter().enumerate() {
                match parse_hex(hex) {
                    Ok(color) => packed[i] = color,
                    Err(e) => {
                        warn!("rejected static colors: {e}");
                        return (
                            StatusCode::OK,
                            Json(CommandResponse::error("Invalid color value")),
                        );
                    }
                }
            }
            state.shared.set_static_colors(packed);
            info!(?colors, "static colors received");
        }
        SetColorRequest::FullSpectrum => {
            state.shared.set_color_mode(ColorMode::FullSpectrum);
            info!("full spectrum mode activated");
        }
        SetColorRequest::Rave => {
            state.shared.set_color_mode(ColorMode::Rave);
            info!("rave mode activated");
        }
        SetColorRequest::Halloween => {
            state.shared.set_color_mode(ColorMode::Halloween);
            info!("halloween mode activated");
        }
        SetColorRequest::BoilerRoom => {
            state.shared.set_color_mode(ColorMode::BoilerRoom);
            info!("boiler room mode activated");
        }
    }

    (StatusCode::OK, Json(CommandResponse::success()))
}

/// Fallback for unknown paths. The contract reports these in-band, not
/// with a 404.
async fn unknown_endpoint() -> Json<CommandResponse> {
    Json(CommandResponse::error("Invalid endpoint"))
}
