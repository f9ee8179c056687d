//! World-space position of an entity.
//!
//! The position is the top-left anchor of the entity's collider, shape and
//! sprite. Rendering subtracts the camera offset from it.

use bevy_ecs::prelude::Component;

use crate::geometry::Vector2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
        }
    }
}
