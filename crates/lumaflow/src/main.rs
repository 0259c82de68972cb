//! LumaFlow - Audio-Reactive LED Strip Visualizer
//!
//! This is the main application crate for LumaFlow. It wires three
//! long-running units around one shared state: the audio analyzer (driven
//! by the capture callback), the color animator (its own thread) and the
//! HTTP control API (tokio). They never call each other; all
//! communication goes through `SharedState`.

#![warn(missing_docs)]

mod logging_setup;

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use lumaflow_control::{
    fetch_access_token, TempoFeed, TempoFeedConfig, WebServer, WebServerConfig,
};
use lumaflow_core::{AudioAnalyzer, AudioCapture, AudioConfig, ColorAnimator, SharedState};

/// Audio-reactive LED strip visualizer: analysis, animation and a JSON
/// control API.
#[derive(Parser, Debug)]
#[command(name = "lumaflow", version, about)]
struct Cli {
    /// Address the control API binds to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port the control API binds to
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Input device name substring; omit to use the default input device
    #[arg(long)]
    device: Option<String>,

    /// Audio sample rate in Hz
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Interleaved input channel count
    #[arg(long, default_value_t = 2)]
    channels: u16,

    /// Spotify client id; tempo feed runs only when id and secret are set
    #[arg(long)]
    spotify_client_id: Option<String>,

    /// Spotify client secret
    #[arg(long)]
    spotify_client_secret: Option<String>,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_setup::init(&cli.log_level);
    info!("=== LumaFlow session started ===");

    let shared = Arc::new(SharedState::new());

    // Audio analysis, fed by the capture callback. A failed device is
    // terminal for the analyzer only; the animator and the control API
    // keep running without audio-derived signals.
    let audio_config = AudioConfig {
        sample_rate: cli.sample_rate,
        channels: cli.channels,
        device: cli.device.clone(),
        ..AudioConfig::default()
    };
    let analyzer = Arc::new(Mutex::new(AudioAnalyzer::new(&audio_config, shared.clone())));
    let _capture = match AudioCapture::start(&audio_config, analyzer) {
        Ok(capture) => Some(capture),
        Err(e) => {
            error!("audio capture unavailable: {e}");
            None
        }
    };

    // Color animation runs on a plain thread; its loop is sleeps and
    // mutex writes, nothing async.
    let animator_state = shared.clone();
    thread::spawn(move || ColorAnimator::new(animator_state).run());

    // Optional external tempo feed.
    match (&cli.spotify_client_id, &cli.spotify_client_secret) {
        (Some(id), Some(secret)) => match fetch_access_token(id, secret).await {
            Ok(token) => {
                let feed = TempoFeed::new(TempoFeedConfig::new(token), shared.clone())?;
                tokio::spawn(feed.run());
            }
            Err(e) => warn!("tempo feed disabled: {e}"),
        },
        _ => info!("no Spotify credentials; tempo feed disabled"),
    }

    let config = WebServerConfig::new(cli.port).with_host(cli.host.clone());
    WebServer::new(config, shared).run().await?;

    Ok(())
}
