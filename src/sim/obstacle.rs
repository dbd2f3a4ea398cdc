//! Square obstacles and their oscillation ("special effect") motion

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::rect::Rect;
use crate::consts::{OBSTACLE_COUNT, OSCILLATION_MAX_RATE, OSCILLATION_MIN_RATE};

/// Lissajous parameters for one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Angular velocity on the x axis (rad/s)
    pub rate_x: f32,
    /// Angular velocity on the y axis (rad/s)
    pub rate_y: f32,
    /// Phase offset applied to the x axis
    pub phase: f32,
}

impl Oscillation {
    /// Draw rates in [OSCILLATION_MIN_RATE, OSCILLATION_MAX_RATE) and a phase in [0, 2π)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rate_x: rng.random_range(OSCILLATION_MIN_RATE..OSCILLATION_MAX_RATE),
            rate_y: rng.random_range(OSCILLATION_MIN_RATE..OSCILLATION_MAX_RATE),
            phase: rng.random_range(0.0..TAU),
        }
    }

    /// Displacement from the anchor at time `t`, each axis bounded by `amplitude`
    #[inline]
    pub fn offset_at(&self, t: f32, amplitude: f32) -> Vec2 {
        Vec2::new(
            (self.rate_x * t + self.phase).sin(),
            (self.rate_y * t).sin(),
        ) * amplitude
    }
}

/// A square obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Rest position (center)
    pub anchor: Vec2,
    /// Current center, sampled once per tick
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    pub oscillation: Oscillation,
}

impl Obstacle {
    pub fn new(anchor: Vec2, size: f32, oscillation: Oscillation) -> Self {
        Self {
            anchor,
            pos: anchor,
            size,
            oscillation,
        }
    }

    /// Current bounds
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, Vec2::splat(self.size))
    }

    /// Position for elapsed time `t`; the anchor when oscillation is off
    pub fn position_at(&self, t: f32, oscillating: bool, amplitude: f32) -> Vec2 {
        if oscillating {
            self.anchor + self.oscillation.offset_at(t, amplitude)
        } else {
            self.anchor
        }
    }

    /// Sample the motion model for this tick
    pub fn advance(&mut self, t: f32, oscillating: bool, amplitude: f32) {
        self.pos = self.position_at(t, oscillating, amplitude);
    }
}

/// Anchors for the four obstacles: thirds of the field on both axes
pub fn obstacle_anchors(field: &Rect) -> [Vec2; OBSTACLE_COUNT] {
    let third = Vec2::new(field.width(), field.height()) / 3.0;
    [
        field.min + third,
        field.min + Vec2::new(third.x, 2.0 * third.y),
        field.min + Vec2::new(2.0 * third.x, third.y),
        field.min + 2.0 * third,
    ]
}
