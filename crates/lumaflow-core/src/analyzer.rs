//! Real-time audio analysis.
//!
//! Converts a stream of interleaved sample blocks into the volume, energy
//! and beat-drop fields of [`SharedState`]. The analyzer is agnostic about
//! where blocks come from: the live [`capture`](crate::capture) module,
//! a recorded-file player or a test feeding synthetic blocks all satisfy
//! the contract by calling [`AudioAnalyzer::process_block`] on their own
//! schedule.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::state::{EnergyTier, SharedState};

/// A new onset needs the block volume to exceed the rolling average by
/// this much...
const ONSET_RISE: f32 = 0.3;
/// ...and to clear this absolute floor.
const ONSET_FLOOR: f32 = 0.35;
/// No new onset within this many seconds of the previous one.
const ONSET_COOLDOWN_SECS: f64 = 10.0;
/// Once flagged, the drop stays active this long regardless of volume.
const HOLD_SECS: f64 = 1.0;

/// Audio input configuration, passed explicitly to the analyzer and the
/// capture layer rather than living in ambient globals.
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Frames per block
    pub block_size: usize,
    /// Input device name substring; `None` picks the default device
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            block_size: 1024,
            device: None,
        }
    }
}

/// Per-block volume/energy/beat-drop pipeline.
pub struct AudioAnalyzer {
    state: Arc<SharedState>,
    channels: usize,
    /// Rolling volume history covering roughly the last second of blocks.
    history: VecDeque<f32>,
    history_cap: usize,
}

impl AudioAnalyzer {
    /// Create an analyzer writing into `state`.
    pub fn new(config: &AudioConfig, state: Arc<SharedState>) -> Self {
        let history_cap = (config.sample_rate as usize / config.block_size.max(1)).max(1);
        debug!(
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            history_cap,
            "audio analyzer created"
        );
        Self {
            state,
            channels: config.channels.max(1) as usize,
            history: VecDeque::with_capacity(history_cap),
            history_cap,
        }
    }

    /// Analyze one block of interleaved samples stamped with a unix
    /// timestamp in seconds, and publish the derived signals.
    pub fn process_block(&mut self, samples: &[f32], timestamp: f64) {
        if samples.is_empty() {
            return;
        }

        let volume = self.block_volume(samples);

        if self.history.len() == self.history_cap {
            self.history.pop_front();
        }
        self.history.push_back(volume);
        let avg_recent = self.history.iter().sum::<f32>() / self.history.len() as f32;

        let since_onset = timestamp - self.state.beat_drop_timestamp();
        if volume - avg_recent > ONSET_RISE
            && volume > ONSET_FLOOR
            && since_onset >= ONSET_COOLDOWN_SECS
        {
            self.state.flag_beat_drop_onset(timestamp);
            debug!(volume, avg_recent, "beat drop onset");
        } else if since_onset <= HOLD_SECS {
            self.state.set_beat_drop(true);
        } else {
            self.state.set_beat_drop(false);
        }

        let tier = EnergyTier::classify(volume);
        if tier == EnergyTier::High {
            self.state.set_last_high_energy_time(timestamp);
        }
        self.state.set_energy_tier(tier);
        self.state.set_volume_level(volume);
    }

    /// Collapse an interleaved block to mono and return `mean(|mono|) * 2`.
    /// Non-finite samples count as silence so a glitching device cannot
    /// poison the rolling statistics.
    fn block_volume(&self, samples: &[f32]) -> f32 {
        let frames = samples.len() / self.channels;
        if frames == 0 {
            return 0.0;
        }
        let mut acc = 0.0f32;
        for frame in samples.chunks_exact(self.channels) {
            let mono: f32 = frame
                .iter()
                .map(|&s| if s.is_finite() { s } else { 0.0 })
                .sum::<f32>()
                / self.channels as f32;
            acc += mono.abs();
        }
        acc / frames as f32 * 2.0
    }
}
