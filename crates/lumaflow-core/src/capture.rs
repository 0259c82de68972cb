//! Live audio capture via cpal.
//!
//! Builds an input stream on the configured device and forwards every
//! callback buffer to an [`AudioAnalyzer`], stamped with unix-epoch
//! seconds. Failure to open the device is terminal for the analyzer only;
//! the rest of the process keeps running without audio-derived signals.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::analyzer::{AudioAnalyzer, AudioConfig};
use crate::{CoreError, Result};

/// Handle to a running input stream. Dropping it stops capture.
pub struct AudioCapture {
    _stream: cpal::Stream,
}

impl AudioCapture {
    /// Open the configured device and start streaming blocks into the
    /// analyzer.
    pub fn start(config: &AudioConfig, analyzer: Arc<Mutex<AudioAnalyzer>>) -> Result<Self> {
        let host = cpal::default_host();
        let device = match &config.device {
            Some(name) => host
                .input_devices()
                .map_err(|e| CoreError::Audio(e.to_string()))?
                .find(|d| d.name().map(|n| n.contains(name)).unwrap_or(false))
                .ok_or_else(|| {
                    CoreError::Audio(format!("no input device matching {name:?}"))
                })?,
            None => host
                .default_input_device()
                .ok_or_else(|| CoreError::Audio("no default input device".to_string()))?,
        };
        info!(
            device = %device.name().unwrap_or_else(|_| "<unnamed>".to_string()),
            sample_rate = config.sample_rate,
            channels = config.channels,
            "opening audio input"
        );

        let sample_format = device
            .default_input_config()
            .map_err(|e| CoreError::Audio(e.to_string()))?
            .sample_format();
        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(config.block_size as u32),
        };

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, analyzer)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, analyzer)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, analyzer)?,
            other => {
                return Err(CoreError::Audio(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| CoreError::Audio(e.to_string()))?;

        Ok(Self { _stream: stream })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    analyzer: Arc<Mutex<AudioAnalyzer>>,
) -> Result<cpal::Stream>
where
    T: Sample + cpal::SizedSample,
    f32: FromSample<T>,
{
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let samples: Vec<f32> = data.iter().map(|&s| s.to_sample()).collect();
                analyzer.lock().process_block(&samples, unix_now());
            },
            // Mid-stream hiccups are transient: log and let the stream
            // carry on (or die) on its own schedule.
            |err| warn!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| CoreError::Audio(e.to_string()))?;
    Ok(stream)
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
