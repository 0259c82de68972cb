//! External tempo feed.
//!
//! Polls Spotify for the tempo of the currently playing track and writes
//! it into the shared state's bpm field. Purely an optional producer: the
//! rest of the system only ever reads `SharedState::bpm`, so running
//! without this feed just leaves the 120 BPM default in place.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use lumaflow_core::SharedState;

use crate::Result;

const CURRENTLY_PLAYING_URL: &str = "https://api.spotify.com/v1/me/player/currently-playing";
const AUDIO_FEATURES_URL: &str = "https://api.spotify.com/v1/audio-features";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tempo feed configuration.
#[derive(Debug, Clone)]
pub struct TempoFeedConfig {
    /// OAuth bearer token for the Spotify Web API
    pub access_token: String,
    /// Fixed re-poll interval; there is no backoff
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl TempoFeedConfig {
    /// Config with the contract's fixed schedule: poll every 20 s, time
    /// out each request after 5 s.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            poll_interval: Duration::from_secs(20),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Deserialize)]
struct CurrentlyPlaying {
    item: TrackItem,
}

#[derive(Deserialize)]
struct TrackItem {
    id: String,
}

#[derive(Deserialize)]
struct AudioFeatures {
    tempo: f32,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Periodic Spotify tempo poller.
pub struct TempoFeed {
    client: reqwest::Client,
    config: TempoFeedConfig,
    state: Arc<SharedState>,
}

impl TempoFeed {
    /// Create a feed writing into `state`.
    pub fn new(config: TempoFeedConfig, state: Arc<SharedState>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            state,
        })
    }

    /// Poll forever on the fixed interval. Failures are logged and the
    /// next tick proceeds; the feed never gives up.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        loop {
            ticker.tick().await;
            match self.fetch_tempo().await {
                Ok(bpm) => {
                    self.state.set_bpm(bpm);
                    info!(bpm, "fetched tempo");
                }
                Err(e) => warn!("tempo fetch failed: {e}"),
            }
        }
    }

    /// Resolve the currently playing track, then its tempo.
    async fn fetch_tempo(&self) -> Result<f32> {
        let playing: CurrentlyPlaying = self
            .client
            .get(CURRENTLY_PLAYING_URL)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let features: AudioFeatures = self
            .client
            .get(format!("{AUDIO_FEATURES_URL}/{}", playing.item.id))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(features.tempo)
    }
}

/// One-shot client-credentials token fetch. Front ends call this with
/// their app id/secret before starting the feed.
pub async fn fetch_access_token(client_id: &str, client_secret: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let response: TokenResponse = client
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.access_token)
}
