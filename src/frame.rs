//! Per-frame snapshot for the presentation layer
//!
//! Everything a renderer needs to draw one frame, detached from `SimState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Effect, Rect, SessionPhase, SimState};

/// Effect-specific overlay data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    None,
    Halo {
        center: Vec2,
        radius: f32,
        axis: Option<(Vec2, Vec2)>,
    },
    MirrorBall {
        pos: Vec2,
    },
    Spin {
        orientation: f32,
    },
}

/// What to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: SessionPhase,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub ball_orientation: f32,
    pub obstacles: Vec<Rect>,
    pub mirror_obstacles: Vec<Rect>,
    /// A contact resolved during the latest tick
    pub collided: bool,
    pub special: bool,
    /// Banner text for the active effect
    pub effect: &'static str,
    pub overlay: Overlay,
}

impl FrameView {
    pub fn capture(state: &SimState) -> Self {
        let overlay = match &state.effect {
            Effect::Inactive => Overlay::None,
            Effect::Homothety {
                halo_radius,
                halo_center,
                axis_start,
                axis_end,
            } => Overlay::Halo {
                center: *halo_center,
                radius: *halo_radius,
                axis: axis_start.map(|start| (start, *axis_end)),
            },
            Effect::Symmetry { mirror } => Overlay::MirrorBall { pos: *mirror },
            Effect::Rotation { .. } => Overlay::Spin {
                orientation: state.ball.orientation,
            },
        };

        Self {
            phase: state.phase,
            ball_pos: state.ball.pos,
            ball_radius: state.ball.radius,
            ball_orientation: state.ball.orientation,
            obstacles: state.obstacles.iter().map(|o| o.rect()).collect(),
            mirror_obstacles: state.mirror_obstacles().to_vec(),
            collided: state.collided,
            special: state.special,
            effect: state.effect.label(),
            overlay,
        }
    }

    /// Whether the welcome screen should be shown instead of the panels
    pub fn is_welcome(&self) -> bool {
        self.phase == SessionPhase::WelcomeIdle
    }
}
