//! Physics integrator.
//!
//! One tick of motion for a body: gravity is added to the vertical velocity
//! unconditionally, each axis is clamped to the speed limit by truncation,
//! and the velocity is added to the position. Ground contact is handled by
//! the collision resolver, never here.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::geometry::Vector2;
use crate::resources::gameconfig::{GameConfig, PhysicsSettings};

/// Truncate `value` to `[-max, max]`, preserving sign.
pub fn clamp_speed(value: f32, max: f32) -> f32 {
    if value.abs() > max {
        max.copysign(value)
    } else {
        value
    }
}

/// Velocity after gravity and the speed clamp.
pub fn step_velocity(velocity: Vector2, physics: &PhysicsSettings) -> Vector2 {
    Vector2::new(
        clamp_speed(velocity.x, physics.max_speed),
        clamp_speed(velocity.y + physics.gravity, physics.max_speed),
    )
}

/// Advance a body by one tick and return its new position.
pub fn integrate(position: Vector2, body: &mut RigidBody, physics: &PhysicsSettings) -> Vector2 {
    body.velocity = step_velocity(body.velocity, physics);
    position + body.velocity
}

/// Moves bodies that have no collider; they pass through everything.
pub fn free_fall(
    mut query: Query<(&mut MapPosition, &mut RigidBody), Without<BoxCollider>>,
    config: Res<GameConfig>,
) {
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        position.pos = integrate(position.pos, &mut rigidbody, &config.physics);
    }
}
