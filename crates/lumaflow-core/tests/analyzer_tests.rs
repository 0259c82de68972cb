//! Beat-drop gating behavior against synthetic block sequences.
//!
//! Blocks are fed directly with explicit timestamps, standing in for the
//! live capture callback, so the 10 s onset cooldown and 1 s hold window
//! are exercised without wall-clock sleeps.

use std::sync::Arc;

use lumaflow_core::{AudioAnalyzer, AudioConfig, EnergyTier, SharedState};

/// Stereo block with a constant mono amplitude, so `volume = amplitude * 2`.
fn block(amplitude: f32, frames: usize) -> Vec<f32> {
    (0..frames).flat_map(|_| [amplitude, amplitude]).collect()
}

fn quiet() -> Vec<f32> {
    block(0.01, 256) // volume 0.02
}

fn loud() -> Vec<f32> {
    block(0.35, 256) // volume 0.7, well past floor and rise
}

fn setup() -> (AudioAnalyzer, Arc<SharedState>) {
    let state = Arc::new(SharedState::new());
    let analyzer = AudioAnalyzer::new(&AudioConfig::default(), state.clone());
    (analyzer, state)
}

/// Feed quiet blocks to settle the rolling average near silence.
fn settle(analyzer: &mut AudioAnalyzer, from: f64) -> f64 {
    let mut ts = from;
    for _ in 0..50 {
        analyzer.process_block(&quiet(), ts);
        ts += 0.023; // ~1024/44100
    }
    ts
}

#[test]
fn test_onset_fires_on_spike_over_quiet_floor() {
    let (mut analyzer, state) = setup();
    let ts = settle(&mut analyzer, 1_000.0);

    assert!(!state.is_beat_drop());
    analyzer.process_block(&loud(), ts);
    assert!(state.is_beat_drop());
    assert_eq!(state.beat_drop_timestamp(), ts);
}

#[test]
fn test_no_onset_below_absolute_floor() {
    let (mut analyzer, state) = setup();
    let ts = settle(&mut analyzer, 1_000.0);

    // Large relative rise but volume 0.34 < 0.35 floor
    analyzer.process_block(&block(0.17, 256), ts);
    assert!(!state.is_beat_drop());
}

#[test]
fn test_no_onset_without_relative_rise() {
    let (mut analyzer, state) = setup();
    // Sustained loudness: the rolling average catches up, so a loud block
    // is no longer a spike.
    let mut ts = 1_000.0;
    for _ in 0..50 {
        analyzer.process_block(&loud(), ts);
        ts += 0.023;
    }
    state.set_beat_drop(false); // clear any early-window hold
    analyzer.process_block(&loud(), ts + 2.0);
    assert!(!state.is_beat_drop());
}

#[test]
fn test_onset_cooldown_ten_seconds() {
    let (mut analyzer, state) = setup();
    let ts = settle(&mut analyzer, 1_000.0);

    analyzer.process_block(&loud(), ts);
    let first_onset = state.beat_drop_timestamp();
    assert!(state.is_beat_drop());

    // Second spike 5 s later: past the hold window, inside the cooldown.
    let ts2 = settle(&mut analyzer, ts + 2.0);
    let spike_at = first_onset + 5.0;
    assert!(spike_at > ts2, "settle ran past the spike time");
    analyzer.process_block(&loud(), spike_at);
    assert_eq!(state.beat_drop_timestamp(), first_onset, "onset re-fired in cooldown");
    assert!(!state.is_beat_drop());

    // A spike 10 s after the first onset may fire again.
    let ts3 = settle(&mut analyzer, first_onset + 6.0);
    let spike_at = first_onset.max(ts3) + 10.0;
    analyzer.process_block(&loud(), spike_at);
    assert_eq!(state.beat_drop_timestamp(), spike_at);
    assert!(state.is_beat_drop());
}

#[test]
fn test_hold_window_keeps_flag_for_one_second() {
    let (mut analyzer, state) = setup();
    let ts = settle(&mut analyzer, 1_000.0);

    analyzer.process_block(&loud(), ts);
    let onset = state.beat_drop_timestamp();

    // Volume collapses immediately, but the flag holds through t+1.
    analyzer.process_block(&quiet(), onset + 0.3);
    assert!(state.is_beat_drop());
    analyzer.process_block(&quiet(), onset + 1.0);
    assert!(state.is_beat_drop());

    // Past the hold window the flag clears.
    analyzer.process_block(&quiet(), onset + 1.5);
    assert!(!state.is_beat_drop());
}

#[test]
fn test_tier_is_pure_function_of_latest_volume() {
    let (mut analyzer, state) = setup();
    let mut ts = 1_000.0;
    for (amplitude, expected) in [
        (0.0, EnergyTier::NoSound),
        (0.03, EnergyTier::None),
        (0.075, EnergyTier::Low),
        (0.125, EnergyTier::Medium),
        (0.25, EnergyTier::High),
        (0.03, EnergyTier::None), // back down with no hysteresis
    ] {
        analyzer.process_block(&block(amplitude, 256), ts);
        assert_eq!(state.energy_tier(), expected, "amplitude {amplitude}");
        ts += 0.023;
    }
}
