//! LumaFlow Core - Audio-Reactive Strip State
//!
//! This crate contains the domain model for LumaFlow, including:
//! - The process-wide shared signal state (volume, energy tier, beat drops,
//!   strip colors)
//! - The real-time audio analysis pipeline
//! - The color-mode animation engine
//! - Packed-RGB color math (HSV conversion, interpolation, hex parsing)
//!
//! ## Feature Flags
//!
//! - `audio`: Enable live microphone/loopback capture (requires `cpal`).
//!   Disable for headless test environments; the analyzer itself accepts
//!   blocks from any producer.

#![warn(missing_docs)]

use thiserror::Error;

/// Color-mode animation engine
pub mod animator;
/// Real-time audio analysis
pub mod analyzer;
/// Packed 24-bit RGB helpers
pub mod color;
/// Shared signal state
pub mod state;

#[cfg(feature = "audio")]
/// Live audio capture via cpal
pub mod capture;

pub use analyzer::{AudioAnalyzer, AudioConfig};
pub use animator::ColorAnimator;
#[cfg(feature = "audio")]
pub use capture::AudioCapture;
pub use color::{format_hex, hsv_to_rgb, interpolate, pack_rgb, parse_hex, unpack_rgb};
pub use state::{ColorMode, EnergyTier, SharedState, STRIP_COUNT};

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// Audio device or stream failure
    #[error("Audio error: {0}")]
    Audio(String),

    /// Malformed hex color string
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
