//! Per-tick velocity of a simulated body.
//!
//! Gravity and the fall speed clamp live in
//! [`PhysicsSettings`](crate::resources::gameconfig::PhysicsSettings) and are
//! applied by [`integrate`](crate::systems::physics::integrate). Controllers
//! (player input, boss brain) write `velocity.x` and jump impulses; the body
//! movement system turns the velocity into a displacement and resolves it
//! against the solids.

use bevy_ecs::prelude::Component;

use crate::geometry::Vector2;

/// Velocity in world units per tick. Positive `y` points down.
///
/// A frozen body is skipped by gravity and by the resolver, and it does not
/// keep a disappearing platform from turning solid again.
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    pub velocity: Vector2,
    pub frozen: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the body where it stands and drop its velocity.
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.velocity = Vector2::zero();
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
