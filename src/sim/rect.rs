//! Axis-aligned rectangle geometry for the field and obstacles
//!
//! Screen coordinates: x grows right, y grows down, so `min.y` is the top edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side of a rectangle a face lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// True for faces parallel to the y axis
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// Sign of the outward normal along the face's axis
    #[inline]
    pub fn outward_sign(self) -> f32 {
        match self {
            Side::Left | Side::Top => -1.0,
            Side::Right | Side::Bottom => 1.0,
        }
    }
}

/// A rectangle corner, named by its sign pair relative to the rectangle center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corner on the side of the center indicated by the signs of `offset`
    pub fn from_offset(offset: Vec2) -> Self {
        match (offset.x >= 0.0, offset.y >= 0.0) {
            (false, false) => Corner::TopLeft,
            (true, false) => Corner::TopRight,
            (false, true) => Corner::BottomLeft,
            (true, true) => Corner::BottomRight,
        }
    }

    /// (sx, sy) with each component ±1
    #[inline]
    pub fn signs(self) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(-1.0, -1.0),
            Corner::TopRight => Vec2::new(1.0, -1.0),
            Corner::BottomLeft => Vec2::new(-1.0, 1.0),
            Corner::BottomRight => Vec2::new(1.0, 1.0),
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Coordinate of a face along its own axis
    pub fn face_coord(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.min.x,
            Side::Right => self.max.x,
            Side::Top => self.min.y,
            Side::Bottom => self.max.y,
        }
    }

    /// Open span of a face along the other axis
    pub fn face_span(&self, side: Side) -> (f32, f32) {
        if side.is_vertical() {
            (self.min.y, self.max.y)
        } else {
            (self.min.x, self.max.x)
        }
    }

    pub fn corner(&self, corner: Corner) -> Vec2 {
        self.center() + corner.signs() * self.half_extents()
    }

    /// Closed containment test
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Strict interior test (points on an edge are outside)
    pub fn interior_contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Reflect across the vertical line x = `axis_x`
    pub fn mirrored_x(&self, axis_x: f32) -> Self {
        Self {
            min: Vec2::new(2.0 * axis_x - self.max.x, self.min.y),
            max: Vec2::new(2.0 * axis_x - self.min.x, self.max.y),
        }
    }
}
