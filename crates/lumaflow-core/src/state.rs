//! Process-wide shared signal state.
//!
//! A single [`SharedState`] instance is created at startup and mutated
//! concurrently by the audio analyzer, the color animator and the control
//! service for the life of the process. Each logical field is guarded by
//! its own mutex; the guards are acquired and released inside the accessor
//! methods and never leak to callers.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Number of independently addressable output strips.
pub const STRIP_COUNT: usize = 4;

/// Strips light up white until something overwrites them.
const DEFAULT_STRIP_COLOR: u32 = 0xFFFFFF;

/// Tempo assumed until the external feed reports one.
const DEFAULT_BPM: f32 = 120.0;

/// Discrete loudness classification of the latest volume sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i8)]
pub enum EnergyTier {
    /// Effectively silent input (volume <= 0.01)
    NoSound = -1,
    /// Audible but negligible energy
    None = 0,
    /// Low energy
    Low = 1,
    /// Medium energy
    Medium = 2,
    /// High energy (volume > 0.30)
    High = 3,
}

impl EnergyTier {
    /// Classify a volume sample. Bands are evaluated high to low; the
    /// first match wins. Pure function of the sample, no hysteresis.
    pub fn classify(volume: f32) -> Self {
        if volume > 0.30 {
            Self::High
        } else if volume > 0.20 {
            Self::Medium
        } else if volume > 0.10 {
            Self::Low
        } else if volume > 0.01 {
            Self::None
        } else {
            Self::NoSound
        }
    }

    /// Wire representation (-1..3).
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Active animation mode for the strip colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Colors are whatever the control plane last wrote; animator idles
    Static = 0,
    /// Single hue sweeping the full spectrum across all strips
    FullSpectrum = 1,
    /// Two random hues assigned to strip pairs
    Rave = 2,
    /// Two colors from the Halloween palette assigned to strip pairs
    Halloween = 3,
    /// Two colors from the boiler-room palette assigned to strip pairs
    BoilerRoom = 4,
}

/// Shared store of derived audio signals, mode selectors and strip colors.
///
/// Lock granularity is per field, matching what each writer actually
/// needs: the analyzer touches the signal fields, the animator the strip
/// colors, the control plane any of them. The only place two guards are
/// held at once is [`SharedState::flag_beat_drop_onset`].
#[derive(Debug)]
pub struct SharedState {
    bpm: Mutex<f32>,
    volume_level: Mutex<f32>,
    energy_tier: Mutex<EnergyTier>,
    is_beat_drop: Mutex<bool>,
    beat_drop_timestamp: Mutex<f64>,
    last_high_energy_time: Mutex<f64>,
    mode: Mutex<i64>,
    color_mode: Mutex<ColorMode>,
    strip_colors: [Mutex<u32>; STRIP_COUNT],
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            bpm: Mutex::new(DEFAULT_BPM),
            volume_level: Mutex::new(0.0),
            energy_tier: Mutex::new(EnergyTier::NoSound),
            is_beat_drop: Mutex::new(false),
            beat_drop_timestamp: Mutex::new(0.0),
            last_high_energy_time: Mutex::new(0.0),
            mode: Mutex::new(0),
            color_mode: Mutex::new(ColorMode::Static),
            strip_colors: [(); STRIP_COUNT].map(|_| Mutex::new(DEFAULT_STRIP_COLOR)),
        }
    }
}

impl SharedState {
    /// Create a state populated with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest externally supplied tempo estimate.
    pub fn bpm(&self) -> f32 {
        *self.bpm.lock()
    }

    /// Overwrite the tempo estimate (external signal feed).
    pub fn set_bpm(&self, bpm: f32) {
        *self.bpm.lock() = bpm;
    }

    /// Most recent instantaneous loudness sample.
    pub fn volume_level(&self) -> f32 {
        *self.volume_level.lock()
    }

    /// Write the latest loudness sample.
    pub fn set_volume_level(&self, volume: f32) {
        *self.volume_level.lock() = volume;
    }

    /// Current energy classification.
    pub fn energy_tier(&self) -> EnergyTier {
        *self.energy_tier.lock()
    }

    /// Write the energy classification.
    pub fn set_energy_tier(&self, tier: EnergyTier) {
        *self.energy_tier.lock() = tier;
    }

    /// Whether a beat drop is currently active (onset or hold window).
    pub fn is_beat_drop(&self) -> bool {
        *self.is_beat_drop.lock()
    }

    /// Set or clear the beat-drop flag without touching the onset time.
    pub fn set_beat_drop(&self, active: bool) {
        *self.is_beat_drop.lock() = active;
    }

    /// Unix timestamp (seconds) of the last beat-drop onset.
    pub fn beat_drop_timestamp(&self) -> f64 {
        *self.beat_drop_timestamp.lock()
    }

    /// Record a new beat-drop onset: flag active and stamp the onset time.
    ///
    /// Lock order is flag first, timestamp nested second. This is the only
    /// site holding two guards; keep the order if another ever appears.
    pub fn flag_beat_drop_onset(&self, now: f64) {
        let mut active = self.is_beat_drop.lock();
        *active = true;
        *self.beat_drop_timestamp.lock() = now;
    }

    /// Unix timestamp (seconds) of the last High-tier sample.
    pub fn last_high_energy_time(&self) -> f64 {
        *self.last_high_energy_time.lock()
    }

    /// Stamp the last High-tier sample time.
    pub fn set_last_high_energy_time(&self, now: f64) {
        *self.last_high_energy_time.lock() = now;
    }

    /// Opaque scene/effect selector; pass-through storage for clients.
    pub fn mode(&self) -> i64 {
        *self.mode.lock()
    }

    /// Overwrite the scene/effect selector. Any integer is accepted.
    pub fn set_mode(&self, mode: i64) {
        *self.mode.lock() = mode;
    }

    /// Active color-animation mode.
    pub fn color_mode(&self) -> ColorMode {
        *self.color_mode.lock()
    }

    /// Switch the color-animation mode. Takes effect at the animator's
    /// next outer-cycle boundary, not mid-interpolation.
    pub fn set_color_mode(&self, mode: ColorMode) {
        *self.color_mode.lock() = mode;
    }

    /// Current rendered color of one strip.
    pub fn strip_color(&self, index: usize) -> u32 {
        *self.strip_colors[index].lock()
    }

    /// Write the rendered color of one strip.
    pub fn set_strip_color(&self, index: usize, color: u32) {
        *self.strip_colors[index].lock() = color;
    }

    /// Snapshot of all strip colors. Each strip is read under its own
    /// guard; no cross-strip atomicity is promised.
    pub fn strip_colors(&self) -> [u32; STRIP_COUNT] {
        std::array::from_fn(|i| *self.strip_colors[i].lock())
    }

    /// Write explicit static colors and drop into [`ColorMode::Static`],
    /// the `/set-color {"mode":"static"}` path.
    pub fn set_static_colors(&self, colors: [u32; STRIP_COUNT]) {
        for (i, color) in colors.iter().enumerate() {
            *self.strip_colors[i].lock() = *color;
        }
        *self.color_mode.lock() = ColorMode::Static;
    }
}
