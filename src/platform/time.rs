//! Frame time sources

use std::time::Instant;

/// Something that reports seconds since it was last restarted
pub trait TimeSource {
    /// Seconds elapsed since the previous restart; restarts the measurement
    fn restart(&mut self) -> f32;
}

/// Monotonic wall clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl TimeSource for FrameClock {
    fn restart(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        elapsed
    }
}

/// Fixed delta per frame, for headless runs and reproducible sessions
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    pub dt: f32,
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl TimeSource for FixedStep {
    fn restart(&mut self) -> f32 {
        self.dt
    }
}
