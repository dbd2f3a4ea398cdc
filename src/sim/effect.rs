//! Visual transformation effects triggered by collisions
//!
//! Exactly one effect is live at a time. A collision rolls a new one and
//! resets its progress; it then advances every unpaused tick until the next
//! collision replaces it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::wrap_angle;

/// The three transformations a collision can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Homothety,
    Symmetry,
    Rotation,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::Homothety,
        EffectKind::Symmetry,
        EffectKind::Rotation,
    ];

    /// Uniform pick, independent of whatever was active before
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Homothety => "Homothety",
            EffectKind::Symmetry => "Symmetry",
            EffectKind::Rotation => "Rotation",
        }
    }
}

/// Per-tick tuning for effect progression
#[derive(Debug, Clone, Copy)]
pub struct EffectParams {
    /// Halo radius gained per tick
    pub halo_growth: f32,
    /// Decorative spin per tick (radians)
    pub rotation_step: f32,
    /// Mirror line for symmetry (the seam between the two panels)
    pub mirror_axis_x: f32,
}

/// Active effect and its progress
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Effect {
    /// Nothing has collided yet
    #[default]
    Inactive,
    /// Growing halo following the ball, plus the axis it has swept since the trigger
    Homothety {
        halo_radius: f32,
        halo_center: Vec2,
        axis_start: Option<Vec2>,
        axis_end: Vec2,
    },
    /// Ball reflected into the mirror panel
    Symmetry { mirror: Vec2 },
    /// Ball spinning in place; `spun` is the rotation applied since the trigger
    Rotation { spun: f32 },
}

impl Effect {
    /// Fresh progress for `kind` at the moment of the trigger
    pub fn activate(kind: EffectKind, ball: &Ball, params: &EffectParams) -> Self {
        match kind {
            EffectKind::Homothety => Effect::Homothety {
                halo_radius: ball.radius,
                halo_center: ball.pos,
                axis_start: None,
                axis_end: ball.pos,
            },
            EffectKind::Symmetry => Effect::Symmetry {
                mirror: mirror_point(ball.pos, params.mirror_axis_x),
            },
            EffectKind::Rotation => Effect::Rotation { spun: 0.0 },
        }
    }

    /// Roll a new effect for a collision
    pub fn trigger<R: Rng + ?Sized>(rng: &mut R, ball: &Ball, params: &EffectParams) -> Self {
        Self::activate(EffectKind::random(rng), ball, params)
    }

    pub fn kind(&self) -> Option<EffectKind> {
        match self {
            Effect::Inactive => None,
            Effect::Homothety { .. } => Some(EffectKind::Homothety),
            Effect::Symmetry { .. } => Some(EffectKind::Symmetry),
            Effect::Rotation { .. } => Some(EffectKind::Rotation),
        }
    }

    /// Banner text for the presentation layer
    pub fn label(&self) -> &'static str {
        self.kind().map_or("Translation", EffectKind::label)
    }

    /// Progress one unpaused tick
    pub fn advance(&mut self, ball: &mut Ball, params: &EffectParams) {
        match self {
            Effect::Inactive => {}
            Effect::Homothety {
                halo_radius,
                halo_center,
                axis_start,
                axis_end,
            } => {
                *halo_radius += params.halo_growth;
                *halo_center = ball.pos;
                if axis_start.is_none() {
                    *axis_start = Some(ball.pos);
                }
                *axis_end = ball.pos;
            }
            Effect::Symmetry { mirror } => {
                *mirror = mirror_point(ball.pos, params.mirror_axis_x);
            }
            Effect::Rotation { spun } => {
                *spun += params.rotation_step;
                ball.orientation = wrap_angle(ball.orientation + params.rotation_step);
            }
        }
    }
}

/// Reflect a point across the vertical line x = `axis_x`
#[inline]
pub fn mirror_point(p: Vec2, axis_x: f32) -> Vec2 {
    Vec2::new(2.0 * axis_x - p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    fn params() -> EffectParams {
        EffectParams {
            halo_growth: 0.5,
            rotation_step: 0.05,
            mirror_axis_x: 400.0,
        }
    }

    fn ball() -> Ball {
        Ball::new(Vec2::new(100.0, 200.0), 20.0, 0.0)
    }

    #[test]
    fn test_inactive_by_default() {
        let effect = Effect::default();
        assert_eq!(effect.kind(), None);
        assert_eq!(effect.label(), "Translation");
    }

    #[test]
    fn test_homothety_progress() {
        let mut ball = ball();
        let mut effect = Effect::activate(EffectKind::Homothety, &ball, &params());
        assert_eq!(effect.label(), "Homothety");

        effect.advance(&mut ball, &params());
        ball.pos = Vec2::new(110.0, 205.0);
        effect.advance(&mut ball, &params());

        match effect {
            Effect::Homothety {
                halo_radius,
                halo_center,
                axis_start,
                axis_end,
            } => {
                assert_eq!(halo_radius, 21.0);
                assert_eq!(halo_center, Vec2::new(110.0, 205.0));
                assert_eq!(axis_start, Some(Vec2::new(100.0, 200.0)));
                assert_eq!(axis_end, Vec2::new(110.0, 205.0));
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_symmetry_mirrors_across_seam() {
        let mut ball = ball();
        let mut effect = Effect::activate(EffectKind::Symmetry, &ball, &params());
        assert_eq!(effect, Effect::Symmetry { mirror: Vec2::new(700.0, 200.0) });

        ball.pos = Vec2::new(390.0, 300.0);
        effect.advance(&mut ball, &params());
        assert_eq!(effect, Effect::Symmetry { mirror: Vec2::new(410.0, 300.0) });
    }

    #[test]
    fn test_rotation_spins_without_steering() {
        let mut ball = ball();
        let mut effect = Effect::activate(EffectKind::Rotation, &ball, &params());
        for _ in 0..10 {
            effect.advance(&mut ball, &params());
        }
        assert!((ball.orientation - 0.5).abs() < 1e-5);
        assert_eq!(ball.heading, 0.0);
        assert!(matches!(effect, Effect::Rotation { spun } if (spun - 0.5).abs() < 1e-5));
    }

    #[test]
    fn test_selection_is_uniform() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let ball = ball();
        let mut counts: HashMap<EffectKind, u32> = HashMap::new();
        let trials = 10_000;
        for _ in 0..trials {
            let effect = Effect::trigger(&mut rng, &ball, &params());
            if let Some(kind) = effect.kind() {
                *counts.entry(kind).or_default() += 1;
            }
        }
        for kind in EffectKind::ALL {
            let freq = counts.get(&kind).copied().unwrap_or(0) as f32 / trials as f32;
            assert!((freq - 1.0 / 3.0).abs() < 0.03, "{kind:?} frequency {freq}");
        }
    }
}
