//! Axis-aligned hitbox geometry
//!
//! Screen space: x grows to the right, y grows downward, so the floor has the
//! largest y. Hitboxes are independent of any drawn sprite bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (both positive)
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Build from a bottom-left anchor, the way entities are placed on the floor
    pub fn from_bottom_left(anchor: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(anchor.x, anchor.y - size.y),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Area shared with another hitbox (0 when apart or only touching)
    pub fn intersection_area(&self, other: &Hitbox) -> f32 {
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.bottom().min(other.bottom()) - self.top().max(other.top());
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }

    /// True when the two rectangles share a nonzero area.
    /// Touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
