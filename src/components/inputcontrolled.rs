//! Input-controlled movement component.
//!
//! Only entities carrying [`InputControlled`] receive input; the player
//! control system in [`crate::systems::player`] reads it together with the
//! [`InputState`](crate::resources::input::InputState) resource.

use bevy_ecs::prelude::Component;

/// Movement intent parameters for keyboard-driven bodies.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    /// Horizontal speed while left or right is held, units per tick.
    pub run_speed: f32,
    /// Upward speed applied on a jump, units per tick.
    pub jump_speed: f32,
}

impl InputControlled {
    pub fn new(run_speed: f32, jump_speed: f32) -> Self {
        Self {
            run_speed,
            jump_speed,
        }
    }
}
