//! Deterministic simulation module
//!
//! All physics and session logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Contacts resolved in a fixed order
//! - No rendering or platform dependencies

pub mod collision;
pub mod effect;
pub mod geometry;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, Surface, detect_and_resolve, reflect_heading, release_embedded};
pub use effect::{Effect, EffectKind, EffectParams};
pub use geometry::{circle_rect_overlap, nearest_corner, point_to_line_distance};
pub use obstacle::{Obstacle, Oscillation};
pub use rect::{Corner, Rect, Side};
pub use state::{Ball, SessionPhase, SimEvent, SimState};
pub use tick::{TickInput, tick};
