use bevy_ecs::prelude::Component;

use crate::components::statemachine::EntityState;

/// Purely visual entity: drawn and animated, never collides.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Decoration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationState {
    Idle,
}

impl EntityState for DecorationState {
    const SOURCE: &'static str = "decoration";
    const ALL: &'static [Self] = &[DecorationState::Idle];

    fn name(self) -> &'static str {
        "idle"
    }

    fn allows(self, _next: Self) -> bool {
        false
    }
}
