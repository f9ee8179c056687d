use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::components::solid::Solid;

/// Refresh cached world rectangles of solids that moved or were just spawned.
pub fn refresh_solids(
    mut query: Query<(&MapPosition, &Shape, &mut Solid), Or<(Changed<MapPosition>, Changed<Shape>)>>,
) {
    for (position, shape, mut solid) in query.iter_mut() {
        solid.refresh(shape, position.pos);
    }
}
