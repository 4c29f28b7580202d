//! Frame timing
//!
//! [`FrameClock`] measures wall-clock frame time and [`FixedTimestep`] turns
//! it into a whole number of simulation steps.

use std::time::Instant;

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

/// Wall-clock delta between successive frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call (or since creation)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add a frame's worth of time and return how many steps to simulate.
    ///
    /// Frame time is clamped to `MAX_FRAME_TIME`. When the substep cap is hit
    /// the leftover backlog is dropped so a slow host cannot spiral.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_only() {
        let mut ts = FixedTimestep::new(0.01, 8);
        assert_eq!(ts.advance(0.025), 2);
        assert!((ts.alpha() - 0.5).abs() < 1e-3);
        assert_eq!(ts.advance(0.007), 1);
        assert!((ts.alpha() - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_substep_cap_drops_backlog() {
        let mut ts = FixedTimestep::new(0.01, 4);
        assert_eq!(ts.advance(0.1), 4);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut ts = FixedTimestep::new(0.01, 100);
        let steps = ts.advance(5.0);
        assert!((9..=10).contains(&steps));
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::default();
        assert_eq!(ts.advance(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn test_frame_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(a >= 0.0 && b >= 0.0);
    }
}
