//! Simulation state and core entity types
//!
//! Everything a tick mutates lives in one `SimState` owned by the run loop.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Contact;
use super::effect::{Effect, EffectKind};
use super::obstacle::{Obstacle, Oscillation, obstacle_anchors};
use super::rect::Rect;
use crate::consts::OBSTACLE_COUNT;
use crate::settings::Settings;
use crate::{heading_vector, wrap_angle};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Welcome screen, waiting for the start key
    WelcomeIdle,
    /// Ball in motion
    Playing,
    /// Frozen mid-flight
    Paused,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Direction of travel, radians in [0, 2π)
    pub heading: f32,
    /// Decorative spin, only touched by the rotation effect
    pub orientation: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, heading: f32) -> Self {
        Self {
            pos,
            radius,
            heading: wrap_angle(heading),
            orientation: 0.0,
        }
    }

    /// Move along the heading
    #[inline]
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos += heading_vector(self.heading) * speed * dt;
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Started { heading: f32 },
    Paused,
    Resumed,
    SpecialToggled { enabled: bool },
    Collision(Contact),
    EffectChanged(EffectKind),
}

/// Draw a launch heading in whole degrees, redrawing inside the open band (min, max)
pub fn draw_launch_heading<R: Rng + ?Sized>(rng: &mut R, band_min_deg: u32, band_max_deg: u32) -> f32 {
    loop {
        let degrees = rng.random_range(0..360u32);
        if !(band_min_deg < degrees && degrees < band_max_deg) {
            return (degrees as f32).to_radians();
        }
    }
}

/// Salt separating the effect stream from the launch stream
const EFFECT_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub settings: Settings,
    /// Playable rectangle (left panel)
    pub field: Rect,
    pub phase: SessionPhase,
    /// Obstacles oscillate while set
    pub special: bool,
    /// Seconds of unpaused play since the last start
    pub elapsed: f32,
    /// Unpaused ticks since the last start
    pub time_ticks: u64,
    pub ball: Ball,
    pub obstacles: [Obstacle; OBSTACLE_COUNT],
    pub effect: Effect,
    /// Set when any contact resolved during the latest tick
    pub collided: bool,
    /// Set when the frame clock must be restarted before the next tick
    pub clock_reset: bool,
    /// Events since the last drain
    pub events: Vec<SimEvent>,
    /// Launch headings and oscillation parameters
    launch_rng: Pcg32,
    /// Effect selection
    effect_rng: Pcg32,
}

impl SimState {
    /// Create a session on the welcome screen
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut launch_rng = Pcg32::seed_from_u64(seed);
        let effect_rng = Pcg32::seed_from_u64(seed ^ EFFECT_STREAM_SALT);

        let field = settings.field_rect();
        let obstacles = obstacle_anchors(&field).map(|anchor| {
            Obstacle::new(anchor, settings.obstacle_size, Oscillation::random(&mut launch_rng))
        });
        let ball = Ball::new(field.center(), settings.ball_radius, 0.0);

        Self {
            settings,
            field,
            phase: SessionPhase::WelcomeIdle,
            special: false,
            elapsed: 0.0,
            time_ticks: 0,
            ball,
            obstacles,
            effect: Effect::Inactive,
            collided: false,
            clock_reset: false,
            events: Vec::new(),
            launch_rng,
            effect_rng,
        }
    }

    /// Put the ball at the field center with a fresh heading and start playing
    pub fn start(&mut self) {
        let heading = draw_launch_heading(
            &mut self.launch_rng,
            self.settings.launch_band_min_deg,
            self.settings.launch_band_max_deg,
        );
        self.ball = Ball::new(self.field.center(), self.settings.ball_radius, heading);
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.effect = Effect::Inactive;
        self.collided = false;
        self.phase = SessionPhase::Playing;
        self.clock_reset = true;
        self.events.push(SimEvent::Started { heading });
    }

    /// Sample the obstacle motion model at the current elapsed time
    pub fn advance_obstacles(&mut self) {
        let (t, on, amplitude) = (self.elapsed, self.special, self.settings.oscillation_amplitude);
        for obstacle in &mut self.obstacles {
            obstacle.advance(t, on, amplitude);
        }
    }

    /// Roll a new effect after a collision
    pub fn trigger_effect(&mut self) {
        let params = self.settings.effect_params();
        self.effect = Effect::trigger(&mut self.effect_rng, &self.ball, &params);
        if let Some(kind) = self.effect.kind() {
            self.events.push(SimEvent::EffectChanged(kind));
        }
    }

    /// Obstacle bounds reflected into the mirror panel
    pub fn mirror_obstacles(&self) -> [Rect; OBSTACLE_COUNT] {
        let axis = self.settings.panel_width();
        self.obstacles.each_ref().map(|o| o.rect().mirrored_x(axis))
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
