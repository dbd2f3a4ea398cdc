//! GeoT - geometric transformations on a bouncing ball
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, obstacle motion, effects, session phases)
//! - `platform`: Frame clock and key mapping
//! - `runner`: Frame loop glue between platform, simulation and cue sink
//! - `frame`: Per-frame snapshot handed to the presentation layer
//! - `audio`: Fire-and-forget collision cues
//! - `settings`: Data-driven tuning, loadable from JSON

pub mod audio;
pub mod frame;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Default layout and tuning constants
pub mod consts {
    /// Window dimensions (field panel on the left, mirror panel on the right)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Each panel is half the window wide; the banner sits above the panels
    pub const PANEL_WIDTH: f32 = WINDOW_WIDTH / 2.0;
    pub const PANEL_HEIGHT: f32 = 550.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_SPEED: f32 = 200.0;

    /// The field always holds exactly this many obstacles
    pub const OBSTACLE_COUNT: usize = 4;
    /// Obstacles are squares of this side length
    pub const OBSTACLE_SIZE: f32 = 60.0;
    /// Peak displacement of an oscillating obstacle on each axis
    ///
    /// Neighbouring obstacles swing to within `gap - 2 * amplitude` of each
    /// other, which must still clear the ball diameter.
    pub const OSCILLATION_AMPLITUDE: f32 = 15.0;
    /// Range of per-axis angular velocities for oscillation (rad/s)
    pub const OSCILLATION_MIN_RATE: f32 = 0.5;
    pub const OSCILLATION_MAX_RATE: f32 = 2.0;

    /// Halo growth per tick while homothety is active
    pub const HALO_GROWTH: f32 = 0.5;
    /// Visual spin per tick while rotation is active (radians)
    pub const ROTATION_STEP: f32 = 0.05;

    /// Launch headings strictly inside this band (degrees) are redrawn
    pub const LAUNCH_BAND_MIN_DEG: u32 = 60;
    pub const LAUNCH_BAND_MAX_DEG: u32 = 120;

    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit direction for a heading (screen coordinates, y down)
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Heading of a direction vector, wrapped to [0, 2π)
#[inline]
pub fn heading_angle(dir: Vec2) -> f32 {
    wrap_angle(dir.y.atan2(dir.x))
}
