//! Color-mode animation engine.
//!
//! Runs forever once started: at each outer cycle it reads the active
//! [`ColorMode`], computes a new target color per strip, then spends 100
//! inner steps (10 ms apart) sliding the current colors toward the
//! targets, publishing every intermediate frame into [`SharedState`].
//! A mode switch is therefore honored at the next outer-cycle boundary,
//! up to ~1 s after the control plane wrote it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::color::{hsv_to_rgb, interpolate};
use crate::state::{ColorMode, SharedState, STRIP_COUNT};

/// Full-spectrum hue advance per outer cycle, on the 0..255 wheel.
const HUE_STEP: u16 = 20;

/// Interpolation steps per outer cycle.
const STEPS: u32 = 100;

/// Sleep between interpolation steps; one outer cycle is ~1 s.
const STEP_INTERVAL: Duration = Duration::from_millis(10);

/// Orange, purple, red, green.
const HALLOWEEN_PALETTE: [u32; 4] = [0xFF4500, 0x8A2BE2, 0xFF0000, 0x008000];

/// Dark red, indigo.
const BOILER_ROOM_PALETTE: [u32; 2] = [0x8B0000, 0x4B0082];

/// Drives [`SharedState`]'s strip colors toward mode-dependent targets.
pub struct ColorAnimator {
    state: Arc<SharedState>,
    rng: StdRng,
    hue: u16,
    current: [u32; STRIP_COUNT],
    target: [u32; STRIP_COUNT],
}

impl ColorAnimator {
    /// Create an animator seeded from the state's current strip colors.
    pub fn new(state: Arc<SharedState>) -> Self {
        let current = state.strip_colors();
        Self {
            state,
            rng: StdRng::from_os_rng(),
            hue: 0,
            current,
            target: current,
        }
    }

    /// Run the animation loop until process exit.
    pub fn run(&mut self) {
        debug!("color animator started");
        loop {
            // Mode is read once per outer cycle; an in-flight cycle
            // finishes with the old target.
            let mode = self.state.color_mode();
            self.advance_targets(mode);

            if mode == ColorMode::Static {
                // Animator idles so the control plane's direct strip
                // writes never race an interpolation step.
                thread::sleep(STEP_INTERVAL * STEPS);
                continue;
            }

            for step in 0..STEPS {
                let t = step as f32 / STEPS as f32;
                for i in 0..STRIP_COUNT {
                    self.current[i] = interpolate(self.current[i], self.target[i], t);
                    self.state.set_strip_color(i, self.current[i]);
                }
                thread::sleep(STEP_INTERVAL);
            }
        }
    }

    /// Compute the targets for one outer cycle of `mode`.
    fn advance_targets(&mut self, mode: ColorMode) {
        match mode {
            ColorMode::Static => {
                // Resync with whatever the control plane last wrote.
                self.current = self.state.strip_colors();
                self.target = self.current;
            }
            ColorMode::FullSpectrum => {
                self.hue = (self.hue + HUE_STEP) % 256;
                let color = hsv_to_rgb(self.hue as f32, 255, 255);
                self.target = [color; STRIP_COUNT];
            }
            ColorMode::Rave => {
                let c1 = hsv_to_rgb(self.rng.random_range(0..256) as f32, 255, 255);
                let c2 = hsv_to_rgb(self.rng.random_range(0..256) as f32, 255, 255);
                self.pair_targets(c1, c2);
            }
            ColorMode::Halloween => {
                let c1 = HALLOWEEN_PALETTE[self.rng.random_range(0..HALLOWEEN_PALETTE.len())];
                let c2 = HALLOWEEN_PALETTE[self.rng.random_range(0..HALLOWEEN_PALETTE.len())];
                self.pair_targets(c1, c2);
            }
            ColorMode::BoilerRoom => {
                let c1 = BOILER_ROOM_PALETTE[self.rng.random_range(0..BOILER_ROOM_PALETTE.len())];
                let c2 = BOILER_ROOM_PALETTE[self.rng.random_range(0..BOILER_ROOM_PALETTE.len())];
                self.pair_targets(c1, c2);
            }
        }
    }

    /// Assign two colors to a randomly chosen strip pairing:
    /// {0,2}/{1,3} or {0,3}/{1,2}.
    fn pair_targets(&mut self, c1: u32, c2: u32) {
        if self.rng.random() {
            self.target = [c1, c2, c1, c2];
        } else {
            self.target = [c1, c2, c2, c1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_animator(seed: u64) -> (ColorAnimator, Arc<SharedState>) {
        let state = Arc::new(SharedState::new());
        let current = state.strip_colors();
        let animator = ColorAnimator {
            state: state.clone(),
            rng: StdRng::seed_from_u64(seed),
            hue: 0,
            current,
            target: current,
        };
        (animator, state)
    }

    fn is_pairing(target: &[u32; STRIP_COUNT]) -> bool {
        (target[0] == target[2] && target[1] == target[3])
            || (target[0] == target[3] && target[1] == target[2])
    }

    #[test]
    fn test_full_spectrum_hue_wheel() {
        let (mut animator, _state) = seeded_animator(1);
        animator.advance_targets(ColorMode::FullSpectrum);
        assert_eq!(animator.hue, 20);
        assert_eq!(animator.target, [hsv_to_rgb(20.0, 255, 255); STRIP_COUNT]);

        // 256 / 20 is not integral, so the wheel wraps mid-step
        for _ in 0..12 {
            animator.advance_targets(ColorMode::FullSpectrum);
        }
        assert_eq!(animator.hue, (13 * 20) % 256);
    }

    #[test]
    fn test_rave_targets_are_paired() {
        for seed in 0..20 {
            let (mut animator, _state) = seeded_animator(seed);
            animator.advance_targets(ColorMode::Rave);
            assert!(is_pairing(&animator.target), "seed {seed}: {:?}", animator.target);
        }
    }

    #[test]
    fn test_halloween_draws_from_palette() {
        for seed in 0..20 {
            let (mut animator, _state) = seeded_animator(seed);
            animator.advance_targets(ColorMode::Halloween);
            assert!(is_pairing(&animator.target));
            for color in animator.target {
                assert!(HALLOWEEN_PALETTE.contains(&color), "{color:#08x}");
            }
        }
    }

    #[test]
    fn test_boiler_room_draws_from_palette() {
        for seed in 0..20 {
            let (mut animator, _state) = seeded_animator(seed);
            animator.advance_targets(ColorMode::BoilerRoom);
            assert!(is_pairing(&animator.target));
            for color in animator.target {
                assert!(BOILER_ROOM_PALETTE.contains(&color), "{color:#08x}");
            }
        }
    }

    #[test]
    fn test_static_resyncs_from_state() {
        let (mut animator, state) = seeded_animator(7);
        state.set_static_colors([0x112233, 0x445566, 0x778899, 0xAABBCC]);
        animator.advance_targets(ColorMode::Static);
        assert_eq!(animator.current, [0x112233, 0x445566, 0x778899, 0xAABBCC]);
        assert_eq!(animator.target, animator.current);
    }

    #[test]
    fn test_interpolation_converges_on_target() {
        let (mut animator, state) = seeded_animator(3);
        animator.target = [0xFF0000; STRIP_COUNT];

        // One outer cycle's worth of steps, without the sleeps
        for step in 0..STEPS {
            let t = step as f32 / STEPS as f32;
            for i in 0..STRIP_COUNT {
                animator.current[i] = interpolate(animator.current[i], animator.target[i], t);
                animator.state.set_strip_color(i, animator.current[i]);
            }
        }

        // Repeated truncating lerps approach the target from above/below;
        // allow the same ±1 per channel as a single full-range lerp.
        let (r, g, b) = crate::color::unpack_rgb(state.strip_color(0));
        assert!(r >= 0xFE, "r was {r:#x}");
        assert!(g <= 1 && b <= 1);
    }
}
