//! Shared 2D camera resource.
//!
//! The camera is a plain offset subtracted from every world position in the
//! draw pass. It is owned by the scene, never by entities.

use bevy_ecs::prelude::Resource;

use crate::geometry::{Rect, Vector2};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Visible area size in world units.
    pub viewport: Vector2,
    /// World position shown at the top-left of the screen.
    pub offset: Vector2,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vector2::new(width, height),
            offset: Vector2::zero(),
        }
    }

    /// Centre the view on `target`, keeping it inside `bounds`.
    ///
    /// On an axis where the bounds are smaller than the viewport the view
    /// is aligned with the bounds' leading edge.
    pub fn follow(&mut self, target: Vector2, bounds: &Rect) {
        self.offset.x = clamp_axis(target.x - self.viewport.x * 0.5, bounds.left(), bounds.right() - self.viewport.x);
        self.offset.y = clamp_axis(target.y - self.viewport.y * 0.5, bounds.top(), bounds.bottom() - self.viewport.y);
    }

    pub fn to_screen(&self, world: Vector2) -> Vector2 {
        world - self.offset
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if max < min { min } else { value.clamp(min, max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centres_target() {
        let mut cam = Camera::new(100.0, 50.0);
        cam.follow(Vector2::new(500.0, 300.0), &Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert_eq!(cam.offset, Vector2::new(450.0, 275.0));
        assert_eq!(cam.to_screen(Vector2::new(500.0, 300.0)), Vector2::new(50.0, 25.0));
    }

    #[test]
    fn test_follow_clamps_to_bounds() {
        let mut cam = Camera::new(100.0, 50.0);
        let bounds = Rect::new(0.0, 0.0, 400.0, 200.0);
        cam.follow(Vector2::new(10.0, 190.0), &bounds);
        assert_eq!(cam.offset, Vector2::new(0.0, 150.0));
    }

    #[test]
    fn test_small_level_aligns_to_edge() {
        let mut cam = Camera::new(100.0, 50.0);
        cam.follow(Vector2::new(30.0, 10.0), &Rect::new(-5.0, 0.0, 60.0, 20.0));
        assert_eq!(cam.offset, Vector2::new(-5.0, 0.0));
    }
}
