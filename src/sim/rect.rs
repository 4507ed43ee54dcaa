//! Axis-aligned bounding boxes in pixel space
//!
//! Screen convention: x grows to the right, y grows downward, so `top` is the
//! smaller y coordinate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Open-interval overlap on the y axis
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.bottom() > other.top() && self.top() < other.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}
