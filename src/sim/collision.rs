//! Look-ahead touch tests between moving boxes
//!
//! A box "touches" a side of another box when its leading edge, pushed by the
//! current frame's velocity, passes that side while the two boxes already
//! overlap on the perpendicular axis. This is a single-probe test, not a swept
//! one: a box that ends a frame already overlapping an obstacle (large steps,
//! wrap snaps, rebounds) is never reported and tunnels through it.

use glam::Vec2;

use super::rect::Rect;

/// Side of the *static* box being approached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Approached while moving right
    Left,
    /// Approached while moving left
    Right,
    /// Approached while moving down
    Top,
    /// Approached while moving up
    Bottom,
}

/// Whether `moving`, probing ahead by `velocity`, touches `side` of `other`
pub fn touching(moving: &Rect, velocity: Vec2, other: &Rect, side: Side) -> bool {
    match side {
        Side::Left => {
            moving.right() + velocity.x > other.left()
                && moving.left() < other.left()
                && moving.overlaps_y(other)
        }
        Side::Right => {
            moving.left() + velocity.x < other.right()
                && moving.right() > other.right()
                && moving.overlaps_y(other)
        }
        Side::Top => {
            moving.bottom() + velocity.y > other.top()
                && moving.top() < other.top()
                && moving.overlaps_x(other)
        }
        Side::Bottom => {
            moving.top() + velocity.y < other.bottom()
                && moving.bottom() > other.bottom()
                && moving.overlaps_x(other)
        }
    }
}

/// Per-axis contact result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisContact {
    pub x: bool,
    pub y: bool,
}

impl AxisContact {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Test each axis against the side the velocity heads into
pub fn axis_contact(moving: &Rect, velocity: Vec2, other: &Rect) -> AxisContact {
    let x = (velocity.x > 0.0 && touching(moving, velocity, other, Side::Left))
        || (velocity.x < 0.0 && touching(moving, velocity, other, Side::Right));
    let y = (velocity.y > 0.0 && touching(moving, velocity, other, Side::Top))
        || (velocity.y < 0.0 && touching(moving, velocity, other, Side::Bottom));
    AxisContact { x, y }
}
