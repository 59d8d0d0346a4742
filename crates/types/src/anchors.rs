use crate::geometry::Vector2;
use serde::{Deserialize, Serialize};

/// Fractional rectangle on the parent's bounds a canvas child is attached to.
///
/// An axis whose minimum equals its maximum is pinned; otherwise the child
/// stretches between the two edges and is placed with offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub minimum: Vector2,
    pub maximum: Vector2,
}

impl Anchors {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            minimum: Vector2 { x: min_x, y: min_y },
            maximum: Vector2 { x: max_x, y: max_y },
        }
    }

    pub fn is_stretched_horizontally(&self) -> bool {
        self.minimum.x != self.maximum.x
    }

    pub fn is_stretched_vertically(&self) -> bool {
        self.minimum.y != self.maximum.y
    }

    pub fn is_stretched(&self) -> bool {
        self.is_stretched_horizontally() || self.is_stretched_vertically()
    }
}
