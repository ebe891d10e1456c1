//! Axis-aligned bounding boxes
//!
//! Every collision test in the game is an AABB query. Coordinates are
//! screen-space y-down: `top` is the smaller y, `bottom` the larger, and
//! "falling" means velocity y > 0.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test. Boxes that merely share an edge do not overlap,
    /// so a body resting exactly on a platform top reports no collision.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether a point lies inside the box (edges count as inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Smallest translation that moves `self` out of `other`, or `None` when
    /// the boxes don't overlap. Ties go to the vertical axis so a body stuck
    /// in a floor surfaces upward rather than sliding sideways.
    pub fn depenetration(&self, other: &Aabb) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }

        // Distance to clear the overlap through each of the four faces
        let push_left = self.right() - other.left();
        let push_right = other.right() - self.left();
        let push_up = self.bottom() - other.top();
        let push_down = other.bottom() - self.top();

        let dx = if push_left < push_right { -push_left } else { push_right };
        let dy = if push_up < push_down { -push_up } else { push_down };

        if dx.abs() < dy.abs() {
            Some(Vec2::new(dx, 0.0))
        } else {
            Some(Vec2::new(0.0, dy))
        }
    }
}
