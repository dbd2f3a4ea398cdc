//! Collision detection and response for a ball among axis-aligned rectangles
//!
//! The tricky part of GeoT: telling flat-face hits from corner hits and
//! producing an exact bounce for each. Face hits flip one heading component
//! and mirror the overshoot back across the face. Corner hits reflect about
//! the tangent of the radius-sized circle around the vertex, solved in closed
//! form from the chord offset of the incoming path.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::geometry::{circle_rect_overlap, nearest_corner, signed_line_offset};
use super::obstacle::Obstacle;
use super::rect::{Corner, Rect, Side};
use super::state::Ball;
use crate::{heading_vector, wrap_angle};

/// What the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// One of the field edges
    Boundary(Side),
    /// A flat face of an obstacle
    Face { obstacle: usize, side: Side },
    /// An obstacle vertex
    Corner { obstacle: usize, corner: Corner },
}

/// A resolved contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub surface: Surface,
    /// Overshoot past a face, or back-up distance for a corner
    pub depth: f32,
    pub heading_in: f32,
    pub heading_out: f32,
}

impl Contact {
    pub fn is_corner(&self) -> bool {
        matches!(self.surface, Surface::Corner { .. })
    }
}

/// Reflect a heading off a flat face
///
/// Vertical faces negate the x component (θ' = π − θ), horizontal faces the
/// y component (θ' = 2π − θ).
#[inline]
pub fn reflect_heading(theta: f32, vertical_face: bool) -> f32 {
    if vertical_face {
        wrap_angle(PI - theta)
    } else {
        wrap_angle(-theta)
    }
}

/// Component of `v` along the axis a face constrains
#[inline]
fn axis_component(v: Vec2, side: Side) -> f32 {
    if side.is_vertical() { v.x } else { v.y }
}

#[inline]
fn other_component(v: Vec2, side: Side) -> f32 {
    if side.is_vertical() { v.y } else { v.x }
}

/// How far the ball edge has crossed a face
///
/// `ball_sign` is +1 when the ball belongs on the positive side of the face.
/// Positive results mean the ball overlaps the face by that much.
#[inline]
fn face_overshoot(ball: &Ball, side: Side, face: f32, ball_sign: f32) -> f32 {
    ball.radius - ball_sign * (axis_component(ball.pos, side) - face)
}

/// Reflect the heading and mirror the overshoot back to the ball's side
fn bounce_off_face(ball: &mut Ball, side: Side, overshoot: f32, ball_sign: f32) -> (f32, f32) {
    let heading_in = ball.heading;
    ball.heading = reflect_heading(ball.heading, side.is_vertical());
    let push = ball_sign * 2.0 * overshoot;
    if side.is_vertical() {
        ball.pos.x += push;
    } else {
        ball.pos.y += push;
    }
    (heading_in, ball.heading)
}

/// Bounce off the field edges
///
/// Every edge is checked; a ball wedged into a field corner bounces off both.
pub fn resolve_boundaries(ball: &mut Ball, field: &Rect, contacts: &mut Vec<Contact>) {
    for side in Side::ALL {
        let ball_sign = -side.outward_sign();
        let overshoot = face_overshoot(ball, side, field.face_coord(side), ball_sign);
        if overshoot > 0.0 {
            let (heading_in, heading_out) = bounce_off_face(ball, side, overshoot, ball_sign);
            contacts.push(Contact {
                surface: Surface::Boundary(side),
                depth: overshoot,
                heading_in,
                heading_out,
            });
        }
    }
}

/// Bounce off the faces of one obstacle; returns whether any face fired
///
/// A face only counts while the ball center is level with it and has not
/// crossed the obstacle's midline on that axis.
pub fn resolve_obstacle_faces(
    ball: &mut Ball,
    rect: &Rect,
    obstacle: usize,
    contacts: &mut Vec<Contact>,
) -> bool {
    if !circle_rect_overlap(ball.pos, ball.radius, rect) {
        return false;
    }

    let half = rect.half_extents();
    let mut hit = false;
    for side in Side::ALL {
        let ball_sign = side.outward_sign();
        let overshoot = face_overshoot(ball, side, rect.face_coord(side), ball_sign);
        let (span_min, span_max) = rect.face_span(side);
        let level = other_component(ball.pos, side);

        if overshoot > 0.0
            && overshoot < axis_component(half, side)
            && level > span_min
            && level < span_max
        {
            let (heading_in, heading_out) = bounce_off_face(ball, side, overshoot, ball_sign);
            contacts.push(Contact {
                surface: Surface::Face { obstacle, side },
                depth: overshoot,
                heading_in,
                heading_out,
            });
            hit = true;
        }
    }

    if !hit {
        if let Some(contact) = release_embedded(ball, rect, obstacle) {
            contacts.push(contact);
            hit = true;
        }
    }
    hit
}

/// Push a ball whose center is inside an obstacle back out
///
/// A moving obstacle can land on the ball deeper than any face test reaches.
/// The ball leaves through the nearest face, comes to rest touching it, and
/// bounces if it was heading inward through that face.
pub fn release_embedded(ball: &mut Ball, rect: &Rect, obstacle: usize) -> Option<Contact> {
    if !rect.interior_contains(ball.pos) {
        return None;
    }

    let (side, inset) = Side::ALL
        .into_iter()
        .map(|side| {
            let inset = side.outward_sign() * (rect.face_coord(side) - axis_component(ball.pos, side));
            (side, inset)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let heading_in = ball.heading;
    let outward = side.outward_sign();
    if outward * axis_component(heading_vector(heading_in), side) < 0.0 {
        ball.heading = reflect_heading(heading_in, side.is_vertical());
    }
    let rest = rect.face_coord(side) + outward * ball.radius;
    if side.is_vertical() {
        ball.pos.x = rest;
    } else {
        ball.pos.y = rest;
    }

    Some(Contact {
        surface: Surface::Face { obstacle, side },
        depth: inset + ball.radius,
        heading_in,
        heading_out: ball.heading,
    })
}

/// Bounce off the nearest vertex of an obstacle
///
/// With `w` the offset from the corner to the ball center and `u` the unit
/// heading, the chord offset `h = |u × w|` gives the half-angle
/// `b = asin(h / r)` between the incoming path and the contact normal. The
/// ball backs up `e = r·cos(b) − sqrt(d² − h²)` to the first touching
/// position, turns to `θ + π − 2·sign(u × w)·b`, then travels `e` on the new
/// heading. The sign term covers all four corners and approach quadrants.
///
/// Receding and exactly tangent balls are not contacts.
pub fn resolve_corner(ball: &mut Ball, rect: &Rect, obstacle: usize) -> Option<Contact> {
    let (corner, distance) = nearest_corner(ball.pos, rect)?;
    if distance >= ball.radius {
        return None;
    }

    let vertex = rect.corner(corner);
    let heading_in = ball.heading;
    let dir = heading_vector(heading_in);
    if (ball.pos - vertex).dot(dir) >= 0.0 {
        return None;
    }

    let offset = signed_line_offset(ball.pos, vertex, heading_in);
    let ratio = (offset.abs() / ball.radius).clamp(-1.0, 1.0);
    if ratio >= 1.0 {
        return None;
    }
    let half_angle = ratio.asin();
    let backup =
        ball.radius * half_angle.cos() - (distance * distance - offset * offset).max(0.0).sqrt();

    ball.pos -= dir * backup;
    let side = if offset < 0.0 { -1.0 } else { 1.0 };
    ball.heading = wrap_angle(heading_in + PI - 2.0 * side * half_angle);
    ball.pos += heading_vector(ball.heading) * backup;

    Some(Contact {
        surface: Surface::Corner { obstacle, corner },
        depth: backup,
        heading_in,
        heading_out: ball.heading,
    })
}

/// Run all contact tests for one tick and return what fired, in order
///
/// Field edges first, then every obstacle's faces, then the corners of
/// obstacles whose faces stayed quiet, then a last pass releasing the ball
/// from any obstacle it still sits inside. Each contact is applied as found.
pub fn detect_and_resolve(ball: &mut Ball, field: &Rect, obstacles: &[Obstacle]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    resolve_boundaries(ball, field, &mut contacts);

    let face_hits: Vec<bool> = obstacles
        .iter()
        .enumerate()
        .map(|(i, obstacle)| resolve_obstacle_faces(ball, &obstacle.rect(), i, &mut contacts))
        .collect();

    for (i, obstacle) in obstacles.iter().enumerate() {
        if face_hits[i] {
            continue;
        }
        if let Some(contact) = resolve_corner(ball, &obstacle.rect(), i) {
            contacts.push(contact);
        }
    }

    // A later bounce can shove the ball into an obstacle handled earlier
    for (i, obstacle) in obstacles.iter().enumerate() {
        if let Some(contact) = release_embedded(ball, &obstacle.rect(), i) {
            contacts.push(contact);
        }
    }

    contacts
}
