//! Distance and overlap helpers for circle-vs-rectangle contact

use glam::Vec2;

use super::rect::{Corner, Rect};
use crate::heading_vector;

/// Signed offset of `point` from the line through `origin` along heading `theta`
///
/// Equals `u × (point - origin)` for the unit heading `u`: positive when the
/// point lies counter-clockwise of the direction in y-up terms.
#[inline]
pub fn signed_line_offset(point: Vec2, origin: Vec2, theta: f32) -> f32 {
    heading_vector(theta).perp_dot(point - origin)
}

/// Perpendicular distance from `point` to the line through `origin` along heading `theta`
#[inline]
pub fn point_to_line_distance(point: Vec2, origin: Vec2, theta: f32) -> f32 {
    signed_line_offset(point, origin, theta).abs()
}

/// Whether a circle overlaps a rectangle (touching does not count)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min, rect.max);
    center.distance_squared(closest) < radius * radius
}

/// Nearest corner and its distance, when `center` lies in a corner region
///
/// A corner region is outside the rectangle's span on both axes. Points level
/// with a face belong to that face and yield `None`.
pub fn nearest_corner(center: Vec2, rect: &Rect) -> Option<(Corner, f32)> {
    let offset = center - rect.center();
    let half = rect.half_extents();
    if offset.x.abs() < half.x || offset.y.abs() < half.y {
        return None;
    }
    let gap = offset.abs() - half;
    Some((Corner::from_offset(offset), gap.length()))
}

/// Reflect a direction about a unit normal
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}
