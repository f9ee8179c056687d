use bevy_ecs::prelude::Component;

/// Present while a body lies entirely outside the level bounds.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct OutOfBounds;
