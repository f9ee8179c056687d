use bevy_ecs::prelude::Component;

use crate::geometry::{Rect, Vector2};

/// Axis-aligned extent of a body, anchored at its [`MapPosition`].
///
/// [`MapPosition`]: super::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Modify BoxCollider with given offset
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space rectangle of the collider for a given entity position.
    pub fn rect(&self, position: Vector2) -> Rect {
        Rect::at(position + self.offset, self.size)
    }

    /// Recover the entity position from a resolved world-space rectangle.
    pub fn position_of(&self, rect: &Rect) -> Vector2 {
        rect.origin() - self.offset
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        self.rect(position).intersects(&other.rect(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_applies_offset() {
        let c = BoxCollider::new(10.0, 20.0).with_offset(Vector2::new(2.0, 3.0));
        let r = c.rect(Vector2::new(100.0, 50.0));
        assert_eq!(r, Rect::new(102.0, 53.0, 10.0, 20.0));
        assert_eq!(c.position_of(&r), Vector2::new(100.0, 50.0));
    }

    #[test]
    fn test_overlaps() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(a.overlaps(Vector2::zero(), &b, Vector2::new(5.0, 5.0)));
        assert!(!a.overlaps(Vector2::zero(), &b, Vector2::new(10.0, 0.0)));
    }
}
